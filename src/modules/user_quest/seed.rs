use crate::config::AppConfig;
use crate::error::Result;
use crate::util::database::Database;
use super::database::{QuestDatabase, UserDatabase};
use super::QuestService;

/// Signs in the configured user, creating them on first run, and starts the
/// configured seed quests when that user has none yet.
pub fn ensure_seeded(database: &Database, config: &AppConfig) -> Result<QuestService> {
    let user_id = match database.get_user_by_email(&config.user.email)? {
        Some(user) => user.id,
        None => database.create_user(&config.user.email, &config.user.role)?,
    };

    let service = QuestService::new(database.clone()).with_identity(user_id);

    if service.count()? == 0 {
        for quest in &config.seed_quests {
            let quest_id = database.create_quest(quest, user_id)?;
            service.create(quest_id)?;
        }
        tracing::info!(user_id, seeded = config.seed_quests.len(), "seeded quests");
    }

    Ok(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::user_quest::NewQuest;

    fn config() -> AppConfig {
        AppConfig {
            seed_quests: vec![
                NewQuest {
                    title: "Court order".to_string(),
                    category: "core".to_string(),
                    jurisdiction: "MA".to_string(),
                },
                NewQuest {
                    title: "Passport".to_string(),
                    category: "travel".to_string(),
                    jurisdiction: "US".to_string(),
                },
            ],
            ..AppConfig::default()
        }
    }

    #[test]
    fn test_seeding_is_idempotent() {
        let database = Database::open_in_memory().unwrap();

        let first = ensure_seeded(&database, &config()).unwrap();
        let second = ensure_seeded(&database, &config()).unwrap();

        assert_eq!(first.identity(), second.identity());
        assert_eq!(second.count().unwrap(), 2);
        assert!(database.get_user_by_email("you@example.com").unwrap().is_some());
    }
}
