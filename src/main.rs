fn main() -> anyhow::Result<()> {
    engine_showcase::run_showcase()
}
