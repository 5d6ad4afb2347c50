//! CLI command handlers

use anyhow::Result;
use tabled::{Table, Tabled};

use crate::{
    domain::manuscript::Manuscript,
    service::{ActionPayload, WorkflowService}
};
use super::Commands;

#[derive(Tabled)]
struct StateRow {
    #[tabled(rename = "Code")]
    code:  &'static str,
    #[tabled(rename = "State")]
    label: &'static str
}

#[derive(Tabled)]
struct ActionRow {
    #[tabled(rename = "Code")]
    code:  &'static str,
    #[tabled(rename = "Action")]
    label: &'static str
}

#[derive(Tabled)]
struct ManuscriptRow {
    #[tabled(rename = "Title")]
    title:    String,
    #[tabled(rename = "Author")]
    author:   String,
    #[tabled(rename = "State")]
    state:    &'static str,
    #[tabled(rename = "Referees")]
    referees: String
}

impl From<&Manuscript> for ManuscriptRow {
    fn from(manuscript: &Manuscript) -> Self {
        Self {
            title:    manuscript.title.clone(),
            author:   manuscript.author.clone(),
            state:    manuscript.state.label(),
            referees: manuscript.referees.join(", ")
        }
    }
}

/// Dispatch a parsed CLI command against the workflow service
pub async fn run(command: Commands, service: &WorkflowService) -> Result<()> {
    match command {
        Commands::States => {
            let rows: Vec<StateRow> =
                service.list_states().iter().map(|s| StateRow { code: s.code(), label: s.label() }).collect();
            println!("{}", Table::new(rows));
        }
        Commands::Actions { state } => {
            let actions = service.list_valid_actions_by_code(&state)?;
            let rows: Vec<ActionRow> =
                actions.iter().map(|a| ActionRow { code: a.code(), label: a.label() }).collect();
            println!("{}", Table::new(rows));
        }
        Commands::Create { title, author, abstract_text, text } => {
            let manuscript = service.create(&title, &author, &abstract_text, &text).await?;
            println!("Created '{}' in state {} ({})", manuscript.title, manuscript.state, manuscript.id);
        }
        Commands::Act { title, action, referee } => {
            let action = action
                .parse()
                .map_err(|_| anyhow::anyhow!("Unknown action code: {}", action))?;
            let payload = ActionPayload { referee };

            let next = service.handle_action_by_title(&title, action, &payload).await?;
            println!("'{}' is now in state {} ({})", title, next, next.label());
        }
        Commands::Show { title } => {
            let manuscript = service.get(&title).await?;
            println!("{}", Table::new([ManuscriptRow::from(&manuscript)]));

            let actions = service.list_valid_actions(manuscript.state);
            let codes: Vec<&str> = actions.iter().map(|a| a.code()).collect();
            println!("Legal actions: {}", codes.join(", "));
        }
        Commands::List => {
            let manuscripts = service.list().await?;
            if manuscripts.is_empty() {
                println!("No manuscripts.");
            } else {
                let rows: Vec<ManuscriptRow> = manuscripts.iter().map(ManuscriptRow::from).collect();
                println!("{}", Table::new(rows));
            }
        }
        Commands::Delete { title } => {
            service.delete(&title).await?;
            println!("Deleted '{}'", title);
        }
    }

    Ok(())
}
