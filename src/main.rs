use clap::Parser;
use pma_migrate::{
    cli::{Cli, Command},
    config, import,
    logger::{self, error},
    seed,
    session::Session,
};

fn main() {
    // File logging under the app config directory; progress goes to stdout.
    if let Ok(dir) = config::get_app_config_path() {
        let _ = logger::init(dir.join("pma-migrate.log"));
    }

    let cli = Cli::parse();
    let config = match config::load(cli.config.as_deref()) {
        Ok(c) => c,
        Err(err) => {
            println!("{err:?}");
            error(&format!("config error: {err:?}"));
            std::process::exit(1);
        }
    };

    // A failed handshake is fatal: no later request can be authorized.
    let mut session = match Session::login(&config) {
        Ok(s) => s,
        Err(err) => {
            println!("{err:?}");
            error(&format!("handshake failed: {err:?}"));
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Command::Seed => seed::run(&session, &config.database).map(|_| ()),
        Command::Import { file } => import::run(&mut session, &file, &config.database),
    };

    if let Err(err) = result {
        println!("{err:?}");
        error(&format!("fatal error: {err:?}"));
        std::process::exit(1);
    }
}
