use std::sync::Arc;

use anyhow::{anyhow, bail, Result};
use clap::{Parser, Subcommand};
use client_core::{
    date_label, spawn_chat_worker, ChatCommand, ChatEvent, ChatSession, EventCard,
    EventQueryClient, HttpEventQueryClient, LocationContext, Message, DEFAULT_QUERY_BASE_URL,
};
use onboarding::{
    lookup_city,
    postal_code::{self, POSTAL_CODE_LEN},
    OnboardingScreen, PostalCodeForm, SlideDeck, DEFAULT_CITY, LANGUAGES,
};
use shared::domain::{Locale, MessageRole};
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::broadcast,
};
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "km0", about = "KM0 local events assistant")]
struct Cli {
    /// Base URL of the event query service.
    #[arg(long, env = "KM0_QUERY_URL", default_value = DEFAULT_QUERY_BASE_URL, global = true)]
    query_url: String,
    #[arg(long, env = "KM0_QUERY_TOKEN", global = true, hide_env_values = true)]
    query_token: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the interface languages.
    Languages,
    /// Walk through the onboarding slides.
    Onboarding {
        #[arg(long, default_value_t = Locale::Es)]
        lang: Locale,
    },
    /// Validate a postal code and show its town.
    PostalCode {
        code: String,
        #[arg(long, default_value_t = Locale::Es)]
        lang: Locale,
    },
    /// Ask one question about local events.
    Ask {
        #[arg(long, default_value_t = Locale::Es)]
        lang: Locale,
        #[arg(long)]
        postal_code: String,
        question: String,
    },
    /// Interactive chat, one question per line.
    Chat {
        #[arg(long, default_value_t = Locale::Es)]
        lang: Locale,
        #[arg(long)]
        postal_code: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    match cli.command {
        Command::Languages => {
            for option in LANGUAGES {
                println!(
                    "{} {:<8} {:<8} {}",
                    option.flag,
                    option.locale.code(),
                    option.name,
                    option.description
                );
            }
        }
        Command::Onboarding { lang } => run_onboarding(lang),
        Command::PostalCode { code, lang } => {
            let location = resolve_location(&code, lang)?;
            println!("{} {}", location.postal_code, location.city_name);
        }
        Command::Ask {
            lang,
            postal_code,
            question,
        } => {
            let location = resolve_location(&postal_code, lang)?;
            let client = query_client(&cli.query_url, cli.query_token.as_deref())?;
            let mut session = ChatSession::new(client, lang, &location.city_name);
            if let Some(reply) = session.send(&question, &location).await {
                print_message(reply, lang);
            }
        }
        Command::Chat { lang, postal_code } => {
            let location = resolve_location(&postal_code, lang)?;
            let client = query_client(&cli.query_url, cli.query_token.as_deref())?;
            run_chat(client, lang, location).await?;
        }
    }

    Ok(())
}

fn query_client(base_url: &str, token: Option<&str>) -> Result<Arc<dyn EventQueryClient>> {
    let mut client = HttpEventQueryClient::for_service(base_url)?;
    if let Some(token) = token {
        client = client.with_bearer_token(token);
    }
    Ok(Arc::new(client))
}

/// Validates `code` the way the postal-code screen does; unknown codes chat as Barcelona.
fn resolve_location(code: &str, locale: Locale) -> Result<LocationContext> {
    if code.chars().count() > POSTAL_CODE_LEN {
        bail!("postal code must have exactly {POSTAL_CODE_LEN} digits, got '{code}'");
    }
    let mut form = PostalCodeForm::new(locale);
    form.set_value(code);
    if let Some(message) = form.error_message() {
        return Err(anyhow!("{message}"));
    }
    let postal_code = form.submit()?;
    let city = lookup_city(&postal_code).unwrap_or(DEFAULT_CITY);
    Ok(LocationContext::new(postal_code, city))
}

fn run_onboarding(locale: Locale) {
    let mut screen = OnboardingScreen::new(SlideDeck::builtin(), locale);
    loop {
        let slide = screen.active_slide();
        println!(
            "[{}] {}  {}",
            screen.counter_label(),
            slide.xp_badge(),
            screen.title()
        );
        println!("    {}", screen.description());
        if !screen.next() {
            break;
        }
    }
    println!();
    println!("{}", postal_code::TITLE.get(locale));
    println!("{}", postal_code::SUBTITLE.get(locale));
}

async fn run_chat(
    client: Arc<dyn EventQueryClient>,
    locale: Locale,
    location: LocationContext,
) -> Result<()> {
    let session = ChatSession::new(client, locale, &location.city_name);
    println!("{}", date_label(locale, chrono::Local::now().date_naive()));
    for message in session.messages() {
        print_message(message, locale);
    }

    let handle = spawn_chat_worker(session, location);
    let mut events = handle.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    'input: while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let mut status = String::new();
        handle.dispatch(ChatCommand::Send { text: line }, &mut status);
        if !status.is_empty() {
            eprintln!("{status}");
            continue;
        }

        loop {
            match events.recv().await {
                Ok(ChatEvent::MessageAppended(message)) if message.role == MessageRole::Assistant => {
                    print_message(&message, locale);
                }
                Ok(ChatEvent::Busy(false)) => break,
                Ok(_) => {}
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "chat output lagged");
                }
                Err(broadcast::error::RecvError::Closed) => break 'input,
            }
        }
    }

    handle.shutdown().await;
    Ok(())
}

fn print_message(message: &Message, locale: Locale) {
    let speaker = match message.role {
        MessageRole::Assistant => "km0",
        MessageRole::User => "you",
    };
    println!("{speaker}> {}", message.text);
    for record in message.event_cards() {
        println!("{}", render_card(&EventCard::from_record(record, locale)));
    }
}

fn render_card(card: &EventCard) -> String {
    let mut lines = vec![format!("  * {}", card.title)];
    if !card.summary.is_empty() {
        lines.push(format!("    {}", card.summary));
    }
    let when = match &card.time {
        Some(time) => format!("{} {time}", card.date),
        None => card.date.clone(),
    };
    lines.push(format!("    {when} | {}", card.place));
    if let Some(price) = &card.price {
        lines.push(format!("    {price}"));
    }
    if !card.tags.is_empty() {
        let tags: Vec<String> = card.tags.iter().map(|tag| format!("#{tag}")).collect();
        lines.push(format!("    {}", tags.join(" ")));
    }
    if let Some(url) = &card.url {
        lines.push(format!("    {url}"));
    }
    lines.join("\n")
}
