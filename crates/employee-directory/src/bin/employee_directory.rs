//! Print the employee roster from a SharePoint list or a JSON export.
//!
//! Settings come from `--flags`, `EMPLOYEE_DIRECTORY_*` variables or a
//! configuration file; see [`DirectorySettings`].

use std::io::{self, Write};

use employee_directory::config::DirectorySettings;
use employee_directory::domain::{
    Employee, EmployeeDirectory, PagedFetcher, avatar_color, filter_roster, initials_from_name,
    status_color,
};
use ortho_config::OrthoConfig;
use tokio::runtime::Builder;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> io::Result<()> {
    if let Err(error) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %error, "tracing init failed");
    }

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| io::Error::other(format!("create Tokio runtime: {error}")))?;
    runtime.block_on(async_main())
}

async fn async_main() -> io::Result<()> {
    let settings = DirectorySettings::load()
        .map_err(|error| io::Error::other(format!("load settings: {error}")))?;
    let source = settings
        .record_source()
        .map_err(|error| io::Error::other(format!("configure record source: {error}")))?;
    let directory = EmployeeDirectory::new(PagedFetcher::new(source, settings.page_size()));

    let roster = directory.load_roster().await;
    if let Some(error) = roster.error {
        return Err(io::Error::other(error));
    }

    let query = settings.query();
    let mut stdout = io::stdout().lock();
    let mut shown = 0_usize;
    for employee in filter_roster(&roster.employees, query) {
        write_employee(&mut stdout, employee)?;
        shown = shown.saturating_add(1);
    }
    info!(total = roster.employees.len(), shown, "roster printed");

    writeln!(stdout, "{shown} of {} employees", roster.employees.len())?;
    if let Some(next_code) = &roster.next_employee_code {
        writeln!(stdout, "next employee code: {next_code}")?;
    }
    Ok(())
}

fn write_employee(out: &mut impl Write, employee: &Employee) -> io::Result<()> {
    let name = employee.display_name();
    writeln!(
        out,
        "[{initials:>2}] {name} #{id}  {color}",
        initials = initials_from_name(name),
        id = employee.id(),
        color = avatar_color(name),
    )?;
    let role = [employee.job_title(), employee.department()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" \u{2022} ");
    if !role.is_empty() {
        writeln!(out, "     {role}")?;
    }
    if !employee.email().is_empty() {
        writeln!(out, "     {}", employee.email())?;
    }
    if let Some(manager) = employee.manager() {
        writeln!(out, "     reports to {}", manager.title())?;
    }
    if let Some(status) = employee.status() {
        writeln!(out, "     {status} ({})", status_color(Some(status)))?;
    }
    Ok(())
}
