//! Implements InputPort. Inquire-based interactive prompts.
//!
//! Sign-in gate first (unauthenticated users only see the login menu), then
//! the main menu: browse the catalog, chat with the assistant, sign out.

use crate::adapters::ui::progress::spinner;
use crate::domain::{Country, DomainError, SortConfig, SortField, SortOrder};
use crate::ports::InputPort;
use crate::usecases::{CatalogService, ChatService, SendOutcome, SessionService};
use async_trait::async_trait;
use inquire::{Confirm, InquireError, Select, Text};
use std::sync::Arc;

/// Canned prompt shortcuts, suffixed with the selected country when there is
/// one ("... in Japan?").
const QUICK_PROMPTS: &[(&str, &str)] = &[
    ("✈️ Travel Tips", "What are the must-visit places and best time to visit"),
    (
        "🎭 Local Customs",
        "What are the important local customs and etiquette I should know about",
    ),
    ("💬 Basic Phrases", "What are some essential local phrases I should know"),
    ("🍴 Local Food", "What are the must-try local dishes and food experiences"),
    (
        "🚌 Transportation",
        "How can I get around and what's the best way to travel locally",
    ),
    ("🛡️ Safety Tips", "What should I know about safety and important precautions"),
];

const SORT_CHOICES: &[(&str, SortConfig)] = &[
    ("Name (A-Z)", SortConfig { field: SortField::Name, order: SortOrder::Ascending }),
    ("Name (Z-A)", SortConfig { field: SortField::Name, order: SortOrder::Descending }),
    ("Capital (A-Z)", SortConfig { field: SortField::Capital, order: SortOrder::Ascending }),
    ("Capital (Z-A)", SortConfig { field: SortField::Capital, order: SortOrder::Descending }),
    ("Continent (A-Z)", SortConfig { field: SortField::Continent, order: SortOrder::Ascending }),
    ("Continent (Z-A)", SortConfig { field: SortField::Continent, order: SortOrder::Descending }),
];

fn map_prompt_err(e: InquireError) -> DomainError {
    DomainError::Input(e.to_string())
}

/// Prompt cancelled with Esc/Ctrl-C counts as "go back", not an error.
fn cancelled(e: &InquireError) -> bool {
    matches!(
        e,
        InquireError::OperationCanceled | InquireError::OperationInterrupted
    )
}

fn country_option(country: &Country) -> String {
    format!(
        "{} {} ({}) - {}",
        country.emoji,
        country.name,
        country.code,
        country.capital.as_deref().unwrap_or("no capital")
    )
}

/// TUI adapter. Inquire prompts.
pub struct TuiInputPort {
    session: Arc<SessionService>,
    catalog: Arc<CatalogService>,
    chat: Arc<ChatService>,
}

impl TuiInputPort {
    pub fn new(
        session: Arc<SessionService>,
        catalog: Arc<CatalogService>,
        chat: Arc<ChatService>,
    ) -> Self {
        Self {
            session,
            catalog,
            chat,
        }
    }

    /// Sign-in gate. Returns false when the user chose to quit instead.
    async fn gate(&self) -> Result<bool, DomainError> {
        while !self.session.is_authenticated().await {
            let choice = match Select::new(
                "You need to sign in to continue",
                vec!["Sign in with Google", "Quit"],
            )
            .prompt()
            {
                Ok(choice) => choice,
                Err(e) if cancelled(&e) => return Ok(false),
                Err(e) => return Err(map_prompt_err(e)),
            };
            if choice == "Quit" {
                return Ok(false);
            }
            match self.session.login().await {
                Ok(user) => println!("Welcome, {}!", user.name),
                Err(e) => println!("Sign-in failed: {}", e),
            }
        }
        Ok(true)
    }

    async fn main_menu(&self) -> Result<(), DomainError> {
        loop {
            let items = vec![
                "Browse countries",
                "Chat with the assistant",
                "Sign out",
                "Quit",
            ];
            let choice = match Select::new("Main menu", items).prompt() {
                Ok(choice) => choice,
                Err(e) if cancelled(&e) => return Ok(()),
                Err(e) => return Err(map_prompt_err(e)),
            };
            match choice {
                "Browse countries" => self.browse_flow().await?,
                "Chat with the assistant" => self.chat_flow(None).await?,
                "Sign out" => {
                    self.session.logout().await?;
                    println!("Signed out.");
                    return Ok(());
                }
                _ => return Ok(()),
            }
        }
    }

    async fn browse_flow(&self) -> Result<(), DomainError> {
        let query = match Text::new("Search:")
            .with_help_message("name, capital, continent, currency, or language; empty for all")
            .prompt()
        {
            Ok(query) => query,
            Err(e) if cancelled(&e) => return Ok(()),
            Err(e) => return Err(map_prompt_err(e)),
        };

        let sort_labels: Vec<&str> = SORT_CHOICES.iter().map(|(label, _)| *label).collect();
        let sort = match Select::new("Sort by", sort_labels).prompt() {
            Ok(label) => {
                SORT_CHOICES
                    .iter()
                    .find(|(l, _)| *l == label)
                    .map(|(_, config)| *config)
                    .unwrap_or_default()
            }
            Err(e) if cancelled(&e) => return Ok(()),
            Err(e) => return Err(map_prompt_err(e)),
        };

        let bar = spinner("Loading countries...");
        let result = self.catalog.browse(&query, sort).await;
        bar.finish_and_clear();

        let countries = match result {
            Ok(countries) => countries,
            Err(e) => {
                println!("Error loading countries: {}", e);
                return Ok(());
            }
        };
        if countries.is_empty() {
            println!("No countries match \"{}\".", query.trim());
            return Ok(());
        }

        let options: Vec<String> = countries.iter().map(country_option).collect();
        let selected = match Select::new("Select a country", options).prompt() {
            Ok(selected) => selected,
            Err(e) if cancelled(&e) => return Ok(()),
            Err(e) => return Err(map_prompt_err(e)),
        };
        // Map the selected display string back to the country (full match).
        let Some(country) = countries.iter().find(|c| country_option(c) == selected) else {
            return Ok(());
        };

        let bar = spinner("Loading detail...");
        let detail = self.catalog.detail(&country.code).await;
        bar.finish_and_clear();
        let detail = match detail {
            Ok(detail) => detail,
            Err(e) => {
                println!("Error loading detail: {}", e);
                return Ok(());
            }
        };
        print_detail(&detail);

        let chat_now = Confirm::new(&format!("Chat about {}?", detail.name))
            .with_default(true)
            .prompt();
        match chat_now {
            Ok(true) => self.chat_flow(Some(&detail)).await,
            Ok(false) => Ok(()),
            Err(e) if cancelled(&e) => Ok(()),
            Err(e) => Err(map_prompt_err(e)),
        }
    }

    async fn chat_flow(&self, selected: Option<&Country>) -> Result<(), DomainError> {
        let context = selected.map(|c| format!("{} ({})", c.name, c.code));
        match selected {
            Some(country) => println!("\n{} Focusing on {}", country.emoji, country.name),
            None => println!("\nTravel assistant (no country selected)"),
        }
        for message in self.chat.transcript().await {
            print_message(message.from_user, &message.text);
        }

        loop {
            let input = match Text::new("You:")
                .with_help_message("/prompts for quick prompts, /reset to start over, /back to leave")
                .prompt()
            {
                Ok(input) => input,
                Err(e) if cancelled(&e) => return Ok(()),
                Err(e) => return Err(map_prompt_err(e)),
            };

            let text = match input.trim() {
                "" => continue,
                "/back" => return Ok(()),
                "/reset" => {
                    self.chat.reset().await;
                    for message in self.chat.transcript().await {
                        print_message(message.from_user, &message.text);
                    }
                    continue;
                }
                "/prompts" => match self.pick_quick_prompt(selected)? {
                    Some(text) => text,
                    None => continue,
                },
                other => other.to_string(),
            };

            let bar = spinner("Assistant is typing...");
            let outcome = self.chat.send(&text, context.as_deref()).await;
            bar.finish_and_clear();

            match outcome {
                SendOutcome::Replied(reply) => print_message(false, &reply.text),
                SendOutcome::Busy => println!("One question at a time, please."),
                SendOutcome::Ignored => {}
            }
        }
    }

    fn pick_quick_prompt(&self, selected: Option<&Country>) -> Result<Option<String>, DomainError> {
        let labels: Vec<&str> = QUICK_PROMPTS.iter().map(|(label, _)| *label).collect();
        let label = match Select::new("Quick prompts", labels).prompt() {
            Ok(label) => label,
            Err(e) if cancelled(&e) => return Ok(None),
            Err(e) => return Err(map_prompt_err(e)),
        };
        let Some((_, prompt)) = QUICK_PROMPTS.iter().find(|(l, _)| *l == label) else {
            return Ok(None);
        };
        let text = match selected {
            Some(country) => format!("{} in {}?", prompt, country.name),
            None => format!("{}?", prompt),
        };
        Ok(Some(text))
    }
}

fn print_message(from_user: bool, text: &str) {
    let who = if from_user { "You" } else { "Assistant" };
    println!("\n[{}] {}", who, text);
}

fn print_detail(country: &Country) {
    println!("\n{} {}", country.emoji, country.name);
    if let Some(native) = &country.native {
        if native != &country.name {
            println!("  Native name: {}", native);
        }
    }
    println!("  Continent:   {}", country.continent.name);
    if let Some(capital) = &country.capital {
        println!("  Capital:     {}", capital);
    }
    if let Some(currency) = &country.currency {
        println!("  Currency:    {}", currency);
    }
    if let Some(phone) = &country.phone {
        println!("  Phone:       +{}", phone);
    }
    if !country.languages.is_empty() {
        let names: Vec<&str> = country.languages.iter().map(|l| l.name.as_str()).collect();
        println!("  Languages:   {}", names.join(", "));
    }
    if !country.states.is_empty() {
        println!("  States:      {}", country.states.len());
    }
}

#[async_trait]
impl InputPort for TuiInputPort {
    async fn run(&self) -> Result<(), DomainError> {
        loop {
            if !self.gate().await? {
                return Ok(());
            }
            // main_menu returns on sign-out (back to the gate) or quit.
            self.main_menu().await?;
            if self.session.is_authenticated().await {
                return Ok(());
            }
        }
    }
}
