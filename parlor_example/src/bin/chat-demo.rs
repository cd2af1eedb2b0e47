use std::io::{BufRead, Write};
use std::sync::Arc;

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use parlor_llm::{HttpChatBackend, Notifier};
use parlor_persist::FileStore;
use parlor_session::SessionStore;
use parlor_types::{Message, Role};

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let base_url =
        std::env::var("PARLOR_API_BASE").unwrap_or_else(|_| "http://localhost:3000".to_string());
    let notifier = match std::env::var("PARLOR_WEBHOOK_URL") {
        Ok(url) => Notifier::new(url),
        Err(_) => Notifier::disabled(),
    };

    let data_dir = dirs::data_dir()
        .unwrap_or_else(|| ".".into())
        .join("parlor");
    let storage = Arc::new(FileStore::new(&data_dir)?);
    let backend = Arc::new(HttpChatBackend::new(&base_url)?);

    println!("Parlor chat demo");
    println!("================");
    println!("backend: {}", base_url);
    println!("storage: {}", data_dir.display());
    println!("commands: /new /list /select <id> /rename <id> <name> /delete <id> /models /quit\n");

    let mut store = SessionStore::load(storage, backend, notifier).await;

    if store.state().model_error {
        println!("(model directory fetch failed; check the backend)");
    }

    // Print assistant text incrementally as snapshots arrive.
    let mut receiver = store.subscribe();
    tokio::spawn(async move {
        let mut turn = (0usize, 0usize); // (message count, printed bytes)
        while receiver.changed().await.is_ok() {
            let snapshot = receiver.borrow_and_update().clone();
            let messages = &snapshot.selected.messages;
            if messages.len() != turn.0 {
                turn = (messages.len(), 0);
            }
            if let Some(last) = messages.last() {
                if last.role == Role::Assistant && last.content.len() > turn.1 {
                    print!("{}", &last.content[turn.1..]);
                    let _ = std::io::stdout().flush();
                    turn.1 = last.content.len();
                }
            }
        }
    });

    prompt(&store);
    for line in std::io::stdin().lock().lines() {
        let line = line?;
        let input = line.trim();

        match input {
            "" => {}
            "/quit" => break,
            "/new" => {
                let id = store.new_conversation();
                println!("created conversation {}", id);
            }
            "/list" => {
                for c in &store.state().conversations {
                    let marker = if c.id == store.state().selected.id {
                        "*"
                    } else {
                        " "
                    };
                    println!("{} [{}] {} ({} messages)", marker, c.id, c.name, c.messages.len());
                }
            }
            "/models" => {
                store.fetch_models().await;
                for model in &store.state().models {
                    println!("  {} ({} tokens)", model.id, model.token_limit);
                }
            }
            _ if input.starts_with("/select ") => {
                if let Ok(id) = input["/select ".len()..].trim().parse() {
                    store.select_conversation(id);
                }
            }
            _ if input.starts_with("/delete ") => {
                if let Ok(id) = input["/delete ".len()..].trim().parse() {
                    store.delete_conversation(id);
                }
            }
            _ if input.starts_with("/rename ") => {
                let rest = input["/rename ".len()..].trim();
                if let Some((id, name)) = rest.split_once(' ') {
                    if let Ok(id) = id.parse() {
                        store.rename_conversation(id, name);
                    }
                }
            }
            text => {
                store.send_message(Message::user(text), false).await;
                println!();
                if store.state().message_error {
                    println!("(send failed; see logs)");
                }
            }
        }

        prompt(&store);
    }

    Ok(())
}

fn prompt(store: &SessionStore) {
    let state = store.state();
    print!("[{}:{}] > ", state.selected.id, state.selected.model.id);
    let _ = std::io::stdout().flush();
}

fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
