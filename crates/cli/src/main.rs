fn main() -> anyhow::Result<()> {
    builderscope_cli::run()
}
