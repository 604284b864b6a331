use clap::Parser;

use log::error;

mod app;
mod args;
mod frame;

use app::App;
use args::Args;

fn main() {
    env_logger::init();

    let args = <Args as Parser>::parse();

    let app = match App::new(&args) {
        Ok(app) => app,
        Err(e) => {
            error!("initialization failed: {e}");
            std::process::exit(-1);
        }
    };

    app.run();
}
