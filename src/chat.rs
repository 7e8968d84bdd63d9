// terminal chat - talk to the relay without running the server

use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::Error;
use crate::core::{ChatRelay, ChatRequest, HELPLINES, Turn};

const EXIT_WORDS: [&str; 3] = ["exit", "quit", "bye"];

pub async fn run(relay: ChatRelay, session: String) -> Result<(), Error> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    // the terminal owns the conversation, the relay never remembers it
    let mut history: Vec<Turn> = Vec::new();

    println!("Hello. This is a safe space, I'm here to listen. (type 'exit' to leave)");

    loop {
        print!("\nyou > ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let message = line.trim();

        if message.is_empty() {
            continue;
        }
        if EXIT_WORDS.contains(&message.to_lowercase().as_str()) {
            break;
        }

        let request = ChatRequest::new(message)
            .with_history(history.clone())
            .with_session(session.as_str());
        let relayed = relay.handle(request).await?;

        println!("\nsolace > {}", relayed.response.reply);

        if relayed.response.risk_detected {
            print_helplines();
        }

        // fallback replies aren't part of the conversation
        if !relayed.is_fallback() {
            history.push(Turn::user(message));
            history.push(Turn::assistant(relayed.response.reply));
        }
    }

    println!("\nTake care of yourself. You can come back any time.");
    Ok(())
}

fn print_helplines() {
    println!("\n  You don't have to go through this alone. Please reach out:");
    for line in HELPLINES {
        println!(
            "  - {} ({}): {} [{}]",
            line.name, line.country, line.number, line.available
        );
    }
}
