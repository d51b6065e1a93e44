use countdown::application::config::loader::ConfigLoader;
use countdown::application::config::models::Config;
use countdown::application::runner::CountdownRunner;
use std::env;

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() > 2 {
        eprintln!("Usage: {} [config_file]", args[0]);
        std::process::exit(1);
    }

    let config = match args.get(1) {
        Some(config_path) => match ConfigLoader::load(config_path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error parsing config file: {}", e);
                std::process::exit(1);
            }
        },
        None => Config::default(),
    };

    let mut runner = match CountdownRunner::new(config) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error starting countdown: {}", e);
            std::process::exit(1);
        }
    };

    runner.print_info();

    if let Err(e) = runner.run() {
        eprintln!("Countdown error: {}", e);
        std::process::exit(1);
    }
}
