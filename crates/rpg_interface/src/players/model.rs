use chrono::serde::{ts_milliseconds, ts_milliseconds_option};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Race {
    Human,
    Dwarf,
    Elf,
    Giant,
    Orc,
    Troll,
    Hobbit,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Profession {
    Warrior,
    Rogue,
    Sorcerer,
    Cleric,
    Paladin,
    Nazgul,
    Warlock,
    Druid,
}

// Field used to order a list of players.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlayerOrder {
    Id,
    Name,
    Experience,
    Birthday,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    // Assigned by the store on the first save.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    pub title: String,
    pub race: Race,
    pub profession: Profession,
    #[serde(with = "ts_milliseconds")]
    pub birthday: DateTime<Utc>,
    pub banned: bool,
    pub experience: i32,
    pub level: i32,
    pub until_next_level: i32,
}

// Payload used to create a player or partially update an existing one.
// Only the fields that are present overwrite the target. The derived
// fields (level, untilNextLevel) are never accepted from the client.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlayerPatch {
    pub name: Option<String>,
    pub title: Option<String>,
    pub race: Option<Race>,
    pub profession: Option<Profession>,
    #[serde(default, with = "ts_milliseconds_option")]
    pub birthday: Option<DateTime<Utc>>,
    pub banned: Option<bool>,
    pub experience: Option<i32>,
}

// Criteria applied as a conjunction over every stored player.
// `after` and `before` are epoch milliseconds.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlayerFilter {
    pub name: Option<String>,
    pub title: Option<String>,
    pub race: Option<Race>,
    pub profession: Option<Profession>,
    pub after: Option<i64>,
    pub before: Option<i64>,
    pub banned: Option<bool>,
    pub min_experience: Option<i32>,
    pub max_experience: Option<i32>,
    pub min_level: Option<i32>,
    pub max_level: Option<i32>,
}

// Query string of the players listing. The filter fields are repeated here
// instead of flattened since urlencoded values can't go through a flattened
// struct with typed fields.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct GetPlayersQuery {
    pub name: Option<String>,
    pub title: Option<String>,
    pub race: Option<Race>,
    pub profession: Option<Profession>,
    pub after: Option<i64>,
    pub before: Option<i64>,
    pub banned: Option<bool>,
    pub min_experience: Option<i32>,
    pub max_experience: Option<i32>,
    pub min_level: Option<i32>,
    pub max_level: Option<i32>,
    pub order: Option<PlayerOrder>,
    pub page_number: Option<i32>,
    pub page_size: Option<i32>,
}

impl GetPlayersQuery {
    pub fn filter(&self) -> PlayerFilter {
        PlayerFilter {
            name: self.name.clone(),
            title: self.title.clone(),
            race: self.race,
            profession: self.profession,
            after: self.after,
            before: self.before,
            banned: self.banned,
            min_experience: self.min_experience,
            max_experience: self.max_experience,
            min_level: self.min_level,
            max_level: self.max_level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn player_uses_camel_case_and_epoch_millis() {
        let player = Player {
            id: Some(4),
            name: "Aragorn".to_string(),
            title: "Ranger of the North".to_string(),
            race: Race::Human,
            profession: Profession::Warrior,
            birthday: Utc.with_ymd_and_hms(2010, 3, 1, 0, 0, 0).unwrap(),
            banned: false,
            experience: 1500,
            level: 5,
            until_next_level: 600,
        };

        let json = serde_json::to_value(&player).unwrap();
        assert_eq!(json["untilNextLevel"], 600);
        assert_eq!(json["race"], "HUMAN");
        assert_eq!(json["profession"], "WARRIOR");
        assert_eq!(json["birthday"], 1_267_401_600_000_i64);
    }

    #[test]
    fn unsaved_player_omits_id() {
        let player = Player {
            id: None,
            name: "Gimli".to_string(),
            title: "Lord".to_string(),
            race: Race::Dwarf,
            profession: Profession::Warrior,
            birthday: Utc.with_ymd_and_hms(2005, 1, 1, 0, 0, 0).unwrap(),
            banned: true,
            experience: 0,
            level: 0,
            until_next_level: 100,
        };

        let json = serde_json::to_value(&player).unwrap();
        assert!(json.get("id").is_none());
    }

    #[test]
    fn patch_keeps_absent_fields_empty() {
        let patch: PlayerPatch =
            serde_json::from_str(r#"{"title":"Dark Lord","level":40}"#).unwrap();

        assert_eq!(patch.title.as_deref(), Some("Dark Lord"));
        assert!(patch.name.is_none());
        assert!(patch.birthday.is_none());
        assert!(patch.experience.is_none());
    }

    #[test]
    fn patch_reads_birthday_as_millis() {
        let patch: PlayerPatch = serde_json::from_str(r#"{"birthday":1267401600000}"#).unwrap();

        assert_eq!(
            patch.birthday,
            Some(Utc.with_ymd_and_hms(2010, 3, 1, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn query_exposes_its_filter() {
        let query = GetPlayersQuery {
            name: Some("ar".to_string()),
            min_level: Some(2),
            order: Some(PlayerOrder::Name),
            page_size: Some(10),
            ..Default::default()
        };

        let filter = query.filter();
        assert_eq!(filter.name.as_deref(), Some("ar"));
        assert_eq!(filter.min_level, Some(2));
        assert_eq!(filter.max_level, None);
    }
}
