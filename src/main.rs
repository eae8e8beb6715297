use anyhow::{bail, Result};
use chrono::Datelike;
use lawn_advisor::{
    render_panel, Evaluator, FixedFlavor, FlavorText, ManualGround, RandomFlavor, Report,
};
use lawn_core::Config;
use lawn_weather::WeatherProvider;

const USAGE: &str = "\
Usage: lawn-enforcer [CITY, REGION] [--ground dry|dew|wet|snow|unknown] [--no-color]

Checks current weather for a location and says whether to mow.
With no location, the configured default is used.";

#[derive(Debug, Default, PartialEq)]
struct Args {
    query: Option<String>,
    ground: Option<ManualGround>,
    no_color: bool,
    help: bool,
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<Args> {
    let mut parsed = Args::default();
    let mut words = Vec::new();
    let mut iter = args.into_iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" => parsed.help = true,
            "--no-color" => parsed.no_color = true,
            "--ground" => match iter.next() {
                Some(value) => parsed.ground = Some(value.parse()?),
                None => bail!("--ground needs a value"),
            },
            other => {
                if let Some(value) = other.strip_prefix("--ground=") {
                    parsed.ground = Some(value.parse()?);
                } else if other.starts_with("--") {
                    bail!("unknown option {}", other);
                } else {
                    words.push(other.to_string());
                }
            }
        }
    }

    // Unquoted "Newton, NJ" arrives as two words
    let query = words.join(" ");
    if !query.trim().is_empty() {
        parsed.query = Some(query.trim().to_string());
    }

    Ok(parsed)
}

#[tokio::main]
async fn main() -> Result<()> {
    lawn_core::init()?;

    let args = parse_args(std::env::args().skip(1))?;
    if args.help {
        println!("{}", USAGE);
        return Ok(());
    }

    let (config, _) = Config::load_validated()?;
    let query = args
        .query
        .clone()
        .unwrap_or_else(|| config.location.default_query.clone());

    let flavor: Box<dyn FlavorText> = if config.display.flavor_text {
        Box::new(RandomFlavor)
    } else {
        Box::new(FixedFlavor::default())
    };
    eprintln!("{}", flavor.loading_message());

    let provider = WeatherProvider::new(&config.providers)?;
    let outcome = provider.lookup(&query, config.location.result_count).await;

    let report = Report::from_lookup(
        outcome,
        &Evaluator::from_config(&config.advisor),
        chrono::Local::now().month(),
        args.ground,
    );
    let color = config.display.color && !args.no_color;
    print!("{}", render_panel(&report, flavor.as_ref(), color));

    Ok(())
}
