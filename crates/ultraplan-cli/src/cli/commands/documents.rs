//! Reference document commands

use std::path::Path;

use tracing::info;

use crate::cli::output::{confirm, print_csv, print_json, truncate};
use crate::cli::{CommandContext, OutputFormat};
use crate::error::Result;
use crate::models::document::check_supported;
use crate::time_utils::format_date;

/// List uploaded documents
pub async fn list(ctx: &CommandContext) -> Result<()> {
    let documents = ctx.client.list_documents().await?;

    match ctx.format {
        OutputFormat::Json => print_json(&documents)?,
        OutputFormat::Csv => print_csv(
            &["id", "filename", "type", "uploaded"],
            documents.iter().map(|d| {
                vec![
                    d.id.clone(),
                    d.filename.clone(),
                    d.file_type.clone(),
                    d.uploaded_at.clone(),
                ]
            }),
        )?,
        OutputFormat::Table => {
            if documents.is_empty() {
                println!("No documents uploaded.");
                return Ok(());
            }
            println!(
                "{:<36} {:<32} {:<6} {:<10}",
                "ID", "Filename", "Type", "Uploaded"
            );
            println!("{}", "-".repeat(88));
            for d in &documents {
                println!(
                    "{:<36} {:<32} {:<6} {:<10}",
                    d.id,
                    truncate(&d.filename, 32),
                    d.file_type,
                    format_date(&d.uploaded_at)
                );
            }
        }
    }
    Ok(())
}

/// Upload a document; the type is checked before anything is sent
pub async fn upload(ctx: &CommandContext, file: &Path) -> Result<()> {
    check_supported(file)?;
    let document = ctx.client.upload_document(file).await?;
    info!(id = %document.id, filename = %document.filename, "Uploaded document");

    if ctx.format == OutputFormat::Json {
        return print_json(&document);
    }
    println!("Uploaded {} ({})", document.filename, document.id);
    if let Some(summary) = &document.summary {
        println!();
        println!("{}", summary);
    }
    Ok(())
}

pub async fn show(ctx: &CommandContext, document_id: &str) -> Result<()> {
    let document = ctx.client.get_document(document_id).await?;

    if ctx.format == OutputFormat::Json {
        return print_json(&document);
    }
    println!("Filename: {}", document.filename);
    println!("Type:     {}", document.file_type);
    println!("Uploaded: {}", format_date(&document.uploaded_at));
    println!();
    println!(
        "{}",
        document.summary.as_deref().unwrap_or("No summary available.")
    );
    Ok(())
}

pub async fn delete(ctx: &CommandContext, document_id: &str, yes: bool) -> Result<()> {
    if !yes && !confirm(&format!("Delete document {}?", document_id))? {
        println!("Cancelled.");
        return Ok(());
    }
    ctx.client.delete_document(document_id).await?;
    println!("Deleted document {}", document_id);
    Ok(())
}
