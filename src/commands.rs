//! Command execution.

use crate::Commands;
use brook_client::{Client, Transport};
use brook_protocol::{CreateStream, Identifier, StreamDetails, StreamSummary, UpdateStream};
use chrono::{DateTime, Utc};
use colored::Colorize;
use serde::Serialize;

/// Executes a command and returns the formatted output.
pub fn execute<T: Transport>(
    client: &Client<T>,
    cmd: Commands,
    json: bool,
) -> Result<String, Box<dyn std::error::Error>> {
    let streams = client.streams();

    match cmd {
        Commands::Ping => {
            client.ping()?;
            Ok("PONG".green().to_string())
        }

        Commands::CreateStream { id, name } => {
            let details = streams.create(&CreateStream::new(id, name))?;
            if json {
                return to_json(&details);
            }
            Ok(format!(
                "{} stream {} (id: {})",
                "Created".green(),
                details.name().cyan(),
                details.id()
            ))
        }

        Commands::GetStream { id } => {
            let id: Identifier = id.parse()?;
            match streams.get(&id)? {
                Some(details) if json => to_json(&details),
                Some(details) => Ok(format_details(&details)),
                None => Err(format!("stream {} not found", id).into()),
            }
        }

        Commands::ListStreams => {
            let items = streams.list()?;
            if json {
                return to_json(&items);
            }
            if items.is_empty() {
                return Ok("No streams".yellow().to_string());
            }
            Ok(items
                .iter()
                .map(format_summary)
                .collect::<Vec<_>>()
                .join("\n"))
        }

        Commands::UpdateStream { id, name } => {
            let id: Identifier = id.parse()?;
            streams.update(&UpdateStream::new(id.clone(), name.clone()))?;
            Ok(format!(
                "{} stream {} to {}",
                "Renamed".green(),
                id.to_string().cyan(),
                name.cyan()
            ))
        }

        Commands::DeleteStream { id } => {
            let id: Identifier = id.parse()?;
            streams.delete(&id)?;
            Ok(format!("{} stream {}", "Deleted".green(), id.to_string().cyan()))
        }
    }
}

fn to_json<V: Serialize>(value: &V) -> Result<String, Box<dyn std::error::Error>> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn format_summary(stream: &StreamSummary) -> String {
    format!(
        "  {:>5}  {}  [topics: {}, messages: {}, size: {}, created: {}]",
        stream.id,
        stream.name.cyan(),
        stream.topics_count,
        stream.messages_count,
        format_size(stream.size_bytes),
        format_timestamp(stream.created_at)
    )
}

fn format_details(details: &StreamDetails) -> String {
    let stream = &details.stream;
    let mut output = format!(
        "{}\n  ID: {}\n  Created: {}\n  Size: {}\n  Messages: {}\n  Topics: {}",
        format!("Stream {}", stream.name.cyan()).bold(),
        stream.id,
        format_timestamp(stream.created_at),
        format_size(stream.size_bytes),
        stream.messages_count,
        stream.topics_count
    );
    for topic in &details.topics {
        output.push_str(&format!(
            "\n    {:>5}  {}  [partitions: {}, messages: {}, size: {}, compression: {:?}]",
            topic.id,
            topic.name.cyan(),
            topic.partitions_count,
            topic.messages_count,
            format_size(topic.size_bytes),
            topic.compression
        ));
    }
    output
}

/// Renders a microsecond Unix timestamp.
fn format_timestamp(micros: u64) -> String {
    i64::try_from(micros)
        .ok()
        .and_then(DateTime::<Utc>::from_timestamp_micros)
        .map(|time| time.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| micros.to_string())
}

fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} B", bytes)
    } else {
        format!("{:.1} {}", size, UNITS[unit])
    }
}
