//! Argument definitions and command handlers.

use agenda_core::{
    export_agenda, ActionStatus, AgendaRecord, AgendaService, AgendaStore, ExportOptions,
    FormSession, MeetingType, Priority,
};
use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "agenda", version, about = "Record meeting agendas and export them as PDF")]
pub struct Cli {
    /// SQLite file holding the saved agendas.
    #[arg(long, env = "AGENDA_DB_PATH", global = true)]
    pub db: Option<PathBuf>,
    /// Absolute directory for rolling log files; logging is off when unset.
    #[arg(long, env = "AGENDA_LOG_DIR", global = true)]
    pub log_dir: Option<PathBuf>,
    /// trace|debug|info|warn|error
    #[arg(long, env = "AGENDA_LOG_LEVEL", global = true)]
    pub log_level: Option<String>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Save a new agenda.
    Add(AddArgs),
    /// Show saved agendas, optionally filtered.
    List(ListArgs),
    /// Delete the agenda at an index shown by `list`.
    Delete(DeleteArgs),
    /// Export the agenda at an index as a PDF.
    Export(ExportArgs),
}

impl Command {
    /// Subcommand name as typed on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Add(_) => "add",
            Self::List(_) => "list",
            Self::Delete(_) => "delete",
            Self::Export(_) => "export",
        }
    }
}

#[derive(Debug, Args)]
pub struct AddArgs {
    #[arg(long)]
    pub title: String,
    /// YYYY-MM-DD
    #[arg(long)]
    pub date: String,
    /// HH:MM
    #[arg(long)]
    pub time: String,
    #[arg(long = "type", value_parser = parse_meeting_type)]
    pub meeting_type: Option<MeetingType>,
    #[arg(long, value_parser = parse_priority, default_value = "Medium")]
    pub priority: Priority,
    #[arg(long = "attendee")]
    pub attendees: Vec<String>,
    /// TOPIC=MINUTES
    #[arg(long = "item", value_parser = parse_agenda_item)]
    pub items: Vec<(String, String)>,
    #[arg(long, default_value = "")]
    pub notes: String,
    /// TASK or TASK=STATUS
    #[arg(long = "action", value_parser = parse_action)]
    pub actions: Vec<(String, ActionStatus)>,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Case-insensitive match on title or notes.
    #[arg(long, short)]
    pub search: Option<String>,
}

#[derive(Debug, Args)]
pub struct DeleteArgs {
    pub index: usize,
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    pub index: usize,
    /// Output directory; defaults to the working directory.
    #[arg(long, default_value = ".")]
    pub out: PathBuf,
    /// Leave empty sections empty instead of showing example content.
    #[arg(long)]
    pub no_placeholders: bool,
    #[arg(long)]
    pub no_footer: bool,
}

pub fn add<S: AgendaStore>(
    service: &mut AgendaService<S>,
    args: AddArgs,
    out: &mut impl Write,
) -> Result<usize> {
    let mut session = FormSession::new();
    session.set_meeting_title(args.title);
    session.set_meeting_date(args.date);
    session.set_meeting_time(args.time);
    session.set_meeting_type(args.meeting_type);
    session.set_priority(args.priority);
    session.set_notes(args.notes);

    for attendee in args.attendees {
        session.set_attendee_input(attendee);
        session.add_attendee();
    }
    for (topic, duration) in args.items {
        session.set_agenda_input(topic, duration);
        session.add_agenda_item();
    }
    for (task, status) in args.actions {
        session.set_action_input(task, status);
        session.add_follow_up_action();
    }

    let total = session.total_duration_minutes();
    let index = session.commit(service).context("agenda was not saved")?;
    writeln!(out, "Meeting agenda saved successfully!")?;
    writeln!(out, "index={index} total_estimated_time={total} mins")?;
    Ok(index)
}

/// Prints the filtered view; returns the number of listed agendas.
pub fn list<S: AgendaStore>(
    service: &mut AgendaService<S>,
    args: ListArgs,
    out: &mut impl Write,
) -> Result<usize> {
    service.set_filter(args.search.unwrap_or_default());
    let entries = service.filtered();
    if entries.is_empty() {
        writeln!(out, "No agendas found.")?;
        return Ok(0);
    }
    for entry in &entries {
        print_agenda(out, entry.index, entry.record)?;
    }
    Ok(entries.len())
}

pub fn delete<S: AgendaStore>(
    service: &mut AgendaService<S>,
    args: DeleteArgs,
    out: &mut impl Write,
) -> Result<()> {
    service.remove_at(args.index)?;
    writeln!(out, "Agenda deleted.")?;
    Ok(())
}

/// Writes the PDF for one agenda; returns its path.
pub fn export<S: AgendaStore>(
    service: &AgendaService<S>,
    args: ExportArgs,
    out: &mut impl Write,
) -> Result<PathBuf> {
    let record = service
        .get(args.index)
        .ok_or_else(|| anyhow!("no agenda at index {}", args.index))?;

    let mut options = ExportOptions::default().with_placeholders(!args.no_placeholders);
    if args.no_footer {
        options = options.with_footer(None);
    }

    let document = export_agenda(record, &options)?;
    let path = document.write_to_dir(&args.out)?;
    writeln!(out, "PDF exported: {}", document.filename)?;
    Ok(path)
}

fn print_agenda(out: &mut impl Write, index: usize, record: &AgendaRecord) -> Result<()> {
    let meeting_type = record.meeting_type.map_or("", MeetingType::as_str);
    writeln!(out, "[{index}] {}", record.meeting_title)?;
    writeln!(
        out,
        "    {} at {} ({}) | Priority: {}",
        record.meeting_date, record.meeting_time, meeting_type, record.priority
    )?;
    writeln!(out, "    Attendees: {}", record.attendees.join(", "))?;
    writeln!(
        out,
        "    Total Estimated Time: {} mins",
        record.total_duration_minutes()
    )?;
    Ok(())
}

fn parse_meeting_type(value: &str) -> Result<MeetingType, String> {
    value.parse().map_err(|err| format!("{err}"))
}

fn parse_priority(value: &str) -> Result<Priority, String> {
    value.parse().map_err(|err| format!("{err}"))
}

fn parse_agenda_item(value: &str) -> Result<(String, String), String> {
    let (topic, minutes) = value
        .rsplit_once('=')
        .ok_or_else(|| format!("expected TOPIC=MINUTES, got `{value}`"))?;
    Ok((topic.to_string(), minutes.to_string()))
}

fn parse_action(value: &str) -> Result<(String, ActionStatus), String> {
    match value.rsplit_once('=') {
        Some((task, status)) => {
            let status = status.parse().map_err(|err| format!("{err}"))?;
            Ok((task.to_string(), status))
        }
        None => Ok((value.to_string(), ActionStatus::NotStarted)),
    }
}
