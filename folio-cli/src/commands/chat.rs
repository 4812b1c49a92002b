use anyhow::{anyhow, Result};
use colored::Colorize;
use folio_core::{
    split_blocks, ApiClient, Block, ChatMessage, ChatResponse, ChatSession, CompletionOutcome,
    FolioConfig, FolioError, PendingRequest, SUGGESTIONS,
};
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::{self, UnboundedSender};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Input {
    Empty,
    Message(String),
    Suggestion(usize),
    Retry,
    ClearError,
    History,
    Help,
    Quit,
    Unknown(String),
}

fn parse_input(line: &str) -> Input {
    let line = line.trim();
    if line.is_empty() {
        return Input::Empty;
    }

    let Some(command) = line.strip_prefix('/') else {
        return Input::Message(line.to_string());
    };

    match command.to_lowercase().as_str() {
        "retry" | "r" => Input::Retry,
        "clear-error" | "clear" => Input::ClearError,
        "history" => Input::History,
        "help" | "?" => Input::Help,
        "quit" | "exit" | "q" => Input::Quit,
        other => match other.parse::<usize>() {
            Ok(n) if (1..=SUGGESTIONS.len()).contains(&n) => Input::Suggestion(n - 1),
            _ => Input::Unknown(line.to_string()),
        },
    }
}

pub async fn cmd_chat(config: &FolioConfig, message: Option<String>) -> Result<()> {
    let client = ApiClient::from_config(&config.api);
    let mut session = ChatSession::new(Arc::new(client));
    let time_format = config.display.time_format.as_str();

    match message {
        Some(message) => send_once(&mut session, &message).await,
        None => interactive(&mut session, time_format).await,
    }
}

async fn send_once(session: &mut ChatSession, message: &str) -> Result<()> {
    if message.trim().is_empty() {
        return Err(FolioError::EmptyMessage.into());
    }

    match session.submit(message).await {
        Some(CompletionOutcome::Replied) => {
            if let Some(reply) = session.transcript().last() {
                print_body(&reply.content);
            }
            Ok(())
        }
        _ => Err(anyhow!(
            "{}",
            session.error().unwrap_or("Message was not sent")
        )),
    }
}

async fn interactive(session: &mut ChatSession, time_format: &str) -> Result<()> {
    print_banner();

    let (tx, mut rx) = mpsc::unbounded_channel::<(u64, ChatResponse)>();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    prompt();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };

                match parse_input(&line) {
                    Input::Empty => {}
                    Input::Quit => return Ok(()),
                    Input::Help => print_help(),
                    Input::History => print_history(session, time_format),
                    Input::ClearError => session.clear_error(),
                    Input::Retry => {
                        if session.is_sending() {
                            print_busy();
                        } else {
                            match session.begin_retry() {
                                Some(pending) => spawn_request(session, pending, &tx),
                                None => println!("{}", "Nothing to retry yet.".dimmed()),
                            }
                        }
                    }
                    Input::Suggestion(index) => {
                        send(session, &SUGGESTIONS[index].prompt(), &tx, time_format);
                    }
                    Input::Message(text) => send(session, &text, &tx, time_format),
                    Input::Unknown(command) => {
                        println!(
                            "{} Unknown command {}. Type /help for commands.",
                            "!".yellow(),
                            command
                        );
                    }
                }
                prompt();
            }
            Some((request_id, response)) = rx.recv() => {
                apply(session, request_id, response, time_format);
                prompt();
            }
        }
    }

    // Input closed: wait for the reply that is still on its way.
    if session.is_sending() {
        if let Some((request_id, response)) = rx.recv().await {
            apply(session, request_id, response, time_format);
        }
    }
    println!();

    Ok(())
}

fn send(
    session: &mut ChatSession,
    text: &str,
    tx: &UnboundedSender<(u64, ChatResponse)>,
    time_format: &str,
) {
    if session.is_sending() {
        print_busy();
        return;
    }

    if let Some(pending) = session.begin_submit(text) {
        if let Some(message) = session.transcript().last() {
            print_message(message, time_format);
        }
        spawn_request(session, pending, tx);
    }
}

fn spawn_request(
    session: &ChatSession,
    pending: PendingRequest,
    tx: &UnboundedSender<(u64, ChatResponse)>,
) {
    let transport = session.transport();
    let tx = tx.clone();

    tokio::spawn(async move {
        let response = pending.dispatch(transport.as_ref()).await;
        if tx.send((pending.request_id, response)).is_err() {
            debug!(request_id = pending.request_id, "Chat loop ended before reply arrived");
        }
    });

    println!("{}", "  thinking…".dimmed());
}

fn apply(session: &mut ChatSession, request_id: u64, response: ChatResponse, time_format: &str) {
    println!();
    match session.complete(request_id, response) {
        CompletionOutcome::Replied => {
            if let Some(message) = session.transcript().last() {
                print_message(message, time_format);
            }
        }
        CompletionOutcome::Failed => print_error(session),
        CompletionOutcome::Stale => {}
    }
}

fn print_banner() {
    println!("{}", "Portfolio Assistant".cyan().bold());
    println!("{}", "═".repeat(40).dimmed());
    println!("Ask about skills, projects, experience or how to get in touch.");
    println!();
    println!("  {}", "Try one of these:".bold());
    for (i, suggestion) in SUGGESTIONS.iter().enumerate() {
        println!("    {} {}", format!("/{}", i + 1).cyan(), suggestion.prompt());
    }
    println!();
    println!("{}", "Type /help for commands, /quit to leave.".dimmed());
}

fn print_help() {
    println!("  {:<14} {}", "/1 … /4".cyan(), "send a suggested question");
    println!("  {:<14} {}", "/retry".cyan(), "resend your last message");
    println!("  {:<14} {}", "/clear-error".cyan(), "dismiss the current error");
    println!("  {:<14} {}", "/history".cyan(), "show the conversation so far");
    println!("  {:<14} {}", "/quit".cyan(), "leave the chat");
}

fn print_busy() {
    println!(
        "{} Still waiting for the previous reply; message not sent.",
        "!".yellow()
    );
}

fn print_error(session: &ChatSession) {
    if let Some(error) = session.error() {
        println!("{} {}", "✗".red().bold(), error.red());
        println!(
            "  {}",
            "Type /retry to resend or /clear-error to dismiss.".dimmed()
        );
    }
}

fn print_history(session: &ChatSession, time_format: &str) {
    if session.transcript().is_empty() {
        println!("{}", "No messages yet.".dimmed());
        return;
    }
    for message in session.transcript() {
        print_message(message, time_format);
    }
    print_error(session);
}

fn print_message(message: &ChatMessage, time_format: &str) {
    let label = if message.is_user() {
        "you".green().bold()
    } else {
        "assistant".magenta().bold()
    };
    println!("{} {}", label, message.local_time(time_format).dimmed());

    if message.is_user() {
        println!("{}", message.content);
    } else {
        print_body(&message.content);
    }
}

fn print_body(content: &str) {
    for block in split_blocks(content) {
        match block {
            Block::Text(text) => println!("{}", text),
            Block::Code { language, code } => {
                println!("{}", format!("┌─ {}", language.as_deref().unwrap_or("code")).dimmed());
                for line in code.lines() {
                    println!("{} {}", "│".dimmed(), line.yellow());
                }
                println!("{}", "└─".dimmed());
            }
        }
    }
}

fn prompt() {
    print!("{} ", ">".cyan().bold());
    let _ = std::io::stdout().flush();
}
