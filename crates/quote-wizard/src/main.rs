fn main() -> anyhow::Result<()> {
    quote_wizard::cli::main()
}
