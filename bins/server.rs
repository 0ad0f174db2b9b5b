fn main() -> anyhow::Result<()> {
    server::run()
}
