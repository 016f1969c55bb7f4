use std::io::{self, BufRead, Write};

use log::error;

use crate::ai::SantaAI;
use crate::error::AppError;
use crate::judge::Judge;
use crate::message::MessageType;
use crate::session::SessionManager;
use crate::store::ListStore;

const LEADERBOARD_LIMIT: i64 = 10;

// The line-oriented front end: same loop as the chat surface, minus the
// drawing. Write-path errors propagate and end the process visibly.
pub async fn run<J: Judge>(
    mut ai: SantaAI<J>,
    store: &ListStore,
    sessions: &SessionManager,
) -> Result<(), AppError> {
    print_leaderboards(store).await;

    for message in ai.transcript() {
        match message.message_type {
            MessageType::User => println!("\nYou: {}", message.content),
            _ => println!("\nJulenissen: {}", message.content),
        }
    }

    let stdin = io::stdin();
    loop {
        print!("\nYou: ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "quit" || line == "exit" {
            break;
        }

        let reply = ai.send_message(line).await?;
        println!("\nJulenissen: {}", reply);

        if let Err(e) = sessions.save(&ai.state) {
            error!("Failed to checkpoint session: {}", e);
        }
    }

    Ok(())
}

// Read-only, so a store failure only costs us the printout.
async fn print_leaderboards(store: &ListStore) {
    let nice = match store.top_nice(LEADERBOARD_LIMIT).await {
        Ok(rows) => rows,
        Err(e) => {
            error!("Failed to load nice leaderboard: {}", e);
            return;
        }
    };
    let naughty = match store.top_naughty(LEADERBOARD_LIMIT).await {
        Ok(rows) => rows,
        Err(e) => {
            error!("Failed to load naughty leaderboard: {}", e);
            return;
        }
    };

    println!("## Top 10 nice names");
    if nice.is_empty() {
        println!("No names on the nice list yet!");
    }
    for (i, row) in nice.iter().enumerate() {
        println!("{}) {} ({} points)", i + 1, row.name, row.nice_meter);
    }

    println!("\n## Top 10 naughty names");
    if naughty.is_empty() {
        println!("No names on the naughty list yet!");
    }
    for (i, row) in naughty.iter().enumerate() {
        println!("{}) {} ({} points)", i + 1, row.name, row.nice_meter);
    }
}
