use nick_backend::agent::{self, SHUTDOWN};
use tokio::io::BufReader;

#[tokio::main(flavor = "current_thread")]
async fn main() -> std::io::Result<()> {
    let input = BufReader::new(tokio::io::stdin());
    let output = tokio::io::stdout();

    tokio::select! {
        result = agent::run_session(input, output) => result,
        _ = tokio::signal::ctrl_c() => {
            println!("\n{SHUTDOWN}");
            Ok(())
        }
    }
}
