use tracing_subscriber::EnvFilter;
use vitalis::config::load_dotenv;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn main() {
    load_dotenv();
    init_tracing();
    dioxus::launch(vitalis::ui::App);
}
