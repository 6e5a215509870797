// Mon Feb 16 2026 - Alex

use colored::Colorize;

fn main() {
    if let Err(err) = il2cpp_sdk_dumper::ui::cli::run() {
        log::error!("{:#}", err);
        eprintln!("{} {:#}", "[!]".red(), err);
        std::process::exit(1);
    }
}
