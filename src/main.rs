fn main() -> anyhow::Result<()> {
    roster_appeal::cli::run()
}
