fn main() -> anyhow::Result<()> {
    thememod_lib::main()
}
