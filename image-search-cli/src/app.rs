// ABOUTME: Runs one CLI command against the search service
// ABOUTME: Wires config, client, display regions and notifier into a controller and prints the outcome

use anyhow::Result;
use image_search_sdk::{
    BufferedRegion, HeaderMap, ImageFilter, ImageSearchController, ImageSearchGateway, Notifier,
    ResultItem, SearchClient,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::IsTerminal;
use std::path::Path;
use std::time::Duration;

use crate::cli::{Cli, Commands, SourceArgs};
use crate::cli_output::CliOutput;
use crate::config::{Config, Settings};
use crate::constants::{timeouts, ui};
use crate::output::{JsonFormatter, OutputFormat, TableFormatter};

type Controller<G, N> = ImageSearchController<G, BufferedRegion, BufferedRegion, N>;

/// Where the submitted image comes from, after clap has enforced that at
/// most one source flag was given.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Selected<'a> {
    File(Option<&'a Path>),
    Base64(&'a Path),
    Url(&'a str),
}

fn selected(source: &SourceArgs) -> Selected<'_> {
    if let Some(url) = &source.url {
        Selected::Url(url)
    } else if let Some(path) = &source.base64 {
        Selected::Base64(path)
    } else {
        Selected::File(source.file.as_deref())
    }
}

fn progress_message(command: &Commands) -> &'static str {
    match command {
        Commands::Import { .. } => "Importing image...",
        Commands::Search { .. } => "Searching for similar images...",
        Commands::Images { .. } => "Fetching images...",
        Commands::Remove { .. } => "Removing image...",
    }
}

fn should_use_color(no_color: bool) -> bool {
    !no_color
        && std::env::var("NO_COLOR").is_err()
        && std::env::var("TERM").unwrap_or_default() != "dumb"
}

fn spinner(message: &'static str) -> Result<Option<ProgressBar>> {
    if !std::io::stderr().is_terminal() {
        return Ok(None);
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::with_template(ui::SPINNER_TEMPLATE)?);
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(timeouts::PROGRESS_BAR_TICK_MS));
    Ok(Some(pb))
}

fn build_client(settings: &Settings, raw_headers: &[String]) -> Result<SearchClient> {
    let mut headers = HeaderMap::new();
    for raw in raw_headers {
        let (name, value) = SearchClient::parse_header(raw)?;
        headers.insert(name, value);
    }

    let client = SearchClient::builder()
        .base_url(settings.api_url.clone())
        .api_prefix(settings.api_prefix.clone())
        .timeout(settings.timeout)
        .headers(headers)
        .build()?;
    Ok(client)
}

/// Run the action a command names. Listing and search hand back their items.
async fn perform<G, N>(
    controller: &mut Controller<G, N>,
    command: &Commands,
) -> image_search_sdk::Result<Option<Vec<ResultItem>>>
where
    G: ImageSearchGateway,
    N: Notifier,
{
    match command {
        Commands::Import { source } => match selected(source) {
            Selected::File(path) => controller.import(path).await.map(|_| None),
            Selected::Base64(path) => controller.import_base64(Some(path)).await.map(|_| None),
            Selected::Url(url) => controller.import_url(url).await.map(|_| None),
        },
        Commands::Search { source } => match selected(source) {
            Selected::File(path) => controller.search(path).await.map(Some),
            Selected::Base64(path) => controller.search_base64(Some(path)).await.map(Some),
            Selected::Url(url) => controller.search_url(url).await.map(Some),
        },
        Commands::Images { field, values, .. } => {
            let filter = field
                .as_ref()
                .map(|name| ImageFilter::new(name.clone(), values.clone()));
            controller.get_images(filter).await.map(Some)
        }
        Commands::Remove { id } => controller
            .remove_image(id.as_deref().unwrap_or_default())
            .await
            .map(|_| None),
    }
}

fn print_outcome<G, N>(
    formatter: &dyn OutputFormat,
    json: bool,
    controller: &Controller<G, N>,
    items: Option<Vec<ResultItem>>,
) -> Result<()>
where
    G: ImageSearchGateway,
    N: Notifier,
{
    let source = controller.source_region();
    let destination = controller.destination_region();

    if json {
        if let Some(items) = items {
            println!("{}", formatter.format_items(&items)?);
        } else if !source.is_empty() {
            let shown = formatter.format_region(ui::SOURCE_TITLE, source.entries())?;
            println!("{}", shown);
        }
        return Ok(());
    }

    if !source.is_empty() {
        let shown = formatter.format_region(ui::SOURCE_TITLE, source.entries())?;
        println!("{}", shown);
    }
    if items.is_some() {
        let results = formatter.format_region(ui::DESTINATION_TITLE, destination.entries())?;
        println!("{}", results);
    }
    Ok(())
}

/// Execute the parsed command line. Returns whether the action succeeded;
/// failures have already been reported to the user when this returns false.
pub async fn run(cli: Cli) -> Result<bool> {
    let config = match cli.config {
        Some(ref path) => Config::load_from_file(path)?,
        None => Config::load()?,
    };
    let mut settings = Settings::resolve(config, &cli)?;
    if let Commands::Images { page_size, page, .. } = &cli.command {
        if let Some(size) = page_size {
            settings.params.page_size = *size;
        }
        settings.params.page_num = *page;
    }
    log::debug!("Resolved settings: {:?}", settings);

    let use_color = should_use_color(cli.no_color);
    let client = build_client(&settings, &cli.headers)?;
    let mut controller = ImageSearchController::new(
        client,
        settings.params,
        BufferedRegion::new(),
        BufferedRegion::new(),
        CliOutput::with_color(use_color),
    );

    let progress = if cli.json {
        None
    } else {
        spinner(progress_message(&cli.command))?
    };
    let outcome = perform(&mut controller, &cli.command).await;
    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    match outcome {
        Ok(items) => {
            let formatter: Box<dyn OutputFormat> = if cli.json {
                Box::new(JsonFormatter::new(std::io::stdout().is_terminal()))
            } else {
                Box::new(TableFormatter::new(use_color))
            };
            print_outcome(formatter.as_ref(), cli.json, &controller, items)?;
            Ok(true)
        }
        Err(err) => {
            log::debug!("Action failed: {:?}", err);
            if let Some(help) = err.help_text() {
                controller.notifier().hint(help);
            }
            Ok(false)
        }
    }
}
