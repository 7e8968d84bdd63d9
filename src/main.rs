// solace - a calm voice on the other end of the line

use solace::cli;

#[tokio::main]
async fn main() {
    if let Err(e) = cli::run().await {
        eprintln!("error: {e:?}");
        std::process::exit(1);
    }
}
