fn main() -> anyhow::Result<()> {
    favourites_app::platform::run_app()
}
