//! AI assistant commands: streamed replies, interactive mode and sessions

use std::io::Write;

use serde::Serialize;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::chat::transcript::{ERROR_REPLY, SEARCH_NOTICE};
use crate::chat::{consume_stream, Transcript, Update};
use crate::cli::output::{confirm, print_csv, print_json, truncate};
use crate::cli::{CommandContext, OutputFormat};
use crate::error::Result;
use crate::models::{ChatRequest, ChatSource};
use crate::time_utils::format_date;

#[derive(Debug, Serialize)]
struct Reply<'a> {
    session_id: Option<&'a str>,
    reply: String,
    sources: &'a [ChatSource],
}

fn print_sources(sources: &[ChatSource]) {
    if sources.is_empty() {
        return;
    }
    println!();
    println!("Sources:");
    for source in sources {
        let name = source.document.as_deref().unwrap_or("unknown");
        match &source.preview {
            Some(preview) => println!("  - {}: {}", name, truncate(preview, 60)),
            None => println!("  - {}", name),
        }
    }
}

/// One chat turn, printing the reply as it streams.
///
/// Returns the session id so a follow-up turn can continue the conversation.
async fn turn(
    ctx: &CommandContext,
    message: String,
    event_id: Option<String>,
    session_id: Option<String>,
) -> Result<Option<String>> {
    let request = ChatRequest {
        message,
        event_id,
        session_id: session_id.clone(),
    };
    let stream = ctx.client.chat_stream(&request).await?;
    let mut transcript = Transcript::new(session_id);
    let streaming = ctx.format != OutputFormat::Json;

    let result = consume_stream(stream, &mut transcript, |update| {
        if !streaming {
            return;
        }
        match update {
            Update::Append(text) => {
                print!("{}", text);
                let _ = std::io::stdout().flush();
            }
            Update::SearchStarted => eprint!("{}", SEARCH_NOTICE),
            Update::Finished => println!(),
            Update::Failed => {
                println!();
                println!("{}", ERROR_REPLY);
            }
            Update::SearchFinished | Update::None => {}
        }
    })
    .await;

    if streaming {
        if result.is_ok() {
            print_sources(&transcript.sources);
        }
    } else {
        print_json(&Reply {
            session_id: transcript.session_id.as_deref(),
            reply: transcript.display_text(),
            sources: &transcript.sources,
        })?;
    }

    result.map(|()| transcript.session_id)
}

/// Send a single message
pub async fn send(
    ctx: &CommandContext,
    message: String,
    event_id: Option<String>,
    session_id: Option<String>,
) -> Result<()> {
    let session = turn(ctx, message, event_id, session_id).await?;
    if let Some(id) = session {
        if ctx.format != OutputFormat::Json {
            eprintln!("Session: {}", id);
        }
    }
    Ok(())
}

/// Interactive chat; the session carries over between turns
pub async fn repl(
    ctx: &CommandContext,
    event_id: Option<String>,
    session_id: Option<String>,
) -> Result<()> {
    let mut session = session_id;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    eprintln!("Ask about your race plan. Type `exit` or press Ctrl-D to quit.");
    loop {
        eprint!("> ");
        std::io::stderr().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let message = line.trim();
        if message.is_empty() {
            continue;
        }
        if matches!(message, "exit" | "quit") {
            break;
        }

        // A failed turn is already reported inline; keep the session going
        match turn(ctx, message.to_string(), event_id.clone(), session.clone()).await {
            Ok(Some(id)) => session = Some(id),
            Ok(None) => {}
            Err(e) => tracing::warn!(error = %e, "Chat turn failed"),
        }
        println!();
    }

    if let Some(id) = session {
        eprintln!("Session: {}", id);
    }
    Ok(())
}

pub async fn sessions(ctx: &CommandContext, event_id: Option<String>) -> Result<()> {
    let sessions = ctx.client.list_chat_sessions(event_id.as_deref()).await?;

    match ctx.format {
        OutputFormat::Json => print_json(&sessions)?,
        OutputFormat::Csv => print_csv(
            &["id", "event_id", "title", "created"],
            sessions.iter().map(|s| {
                vec![
                    s.id.clone(),
                    s.event_id.clone().unwrap_or_default(),
                    s.title.clone().unwrap_or_default(),
                    s.created_at.clone(),
                ]
            }),
        )?,
        OutputFormat::Table => {
            if sessions.is_empty() {
                println!("No chat sessions.");
                return Ok(());
            }
            println!("{:<36} {:<40} {:<10}", "ID", "Title", "Created");
            println!("{}", "-".repeat(88));
            for s in &sessions {
                println!(
                    "{:<36} {:<40} {:<10}",
                    s.id,
                    truncate(s.title.as_deref().unwrap_or("Untitled"), 40),
                    format_date(&s.created_at)
                );
            }
        }
    }
    Ok(())
}

/// Print a session transcript
pub async fn show_session(ctx: &CommandContext, session_id: &str) -> Result<()> {
    let session = ctx.client.get_chat_session(session_id).await?;

    if ctx.format == OutputFormat::Json {
        return print_json(&session);
    }

    println!("{}", session.title.as_deref().unwrap_or("Untitled"));
    println!();
    for message in session.messages.as_deref().unwrap_or_default() {
        let who = if message.role == "user" { "You" } else { "Assistant" };
        println!("{}:", who);
        println!("{}", message.content);
        if let Some(sources) = &message.sources {
            print_sources(sources);
        }
        println!();
    }
    Ok(())
}

pub async fn delete_session(ctx: &CommandContext, session_id: &str, yes: bool) -> Result<()> {
    if !yes && !confirm(&format!("Delete chat session {}?", session_id))? {
        println!("Cancelled.");
        return Ok(());
    }
    ctx.client.delete_chat_session(session_id).await?;
    println!("Deleted chat session {}", session_id);
    Ok(())
}
