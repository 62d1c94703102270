fn main() -> anyhow::Result<()> {
    png2wad::run()
}
