//! Dashbrr CLI
//!
//! Binary name: `dashbrr`

use std::process;

use dashbrr::cli::{
    error::error_code, format_error, get_exit_code, output_json_error, run_cli,
    setup::parse_early_flags,
};

#[tokio::main]
async fn main() {
    let setup = parse_early_flags();

    if let Err(err) = run_cli().await {
        let message = format_error(&err);
        if setup.json_mode {
            output_json_error(error_code(&err), &message, None);
        } else {
            #[allow(clippy::print_stderr)]
            {
                eprintln!("Error: {message}");
            }
        }

        #[allow(clippy::exit)]
        process::exit(get_exit_code(&err));
    }
}
