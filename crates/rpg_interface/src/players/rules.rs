// Validation rules and level formulas for players.

use chrono::{DateTime, NaiveDate, Utc};

use crate::errors::{AppError, Result};
use crate::players::model::{Player, PlayerPatch};

pub const MAX_NAME_LENGTH: usize = 12;
pub const MAX_TITLE_LENGTH: usize = 30;

pub const MIN_EXPERIENCE: i32 = 0;
pub const MAX_EXPERIENCE: i32 = 10_000_000;

pub const MIN_LEVEL: i32 = 1;
pub const MAX_LEVEL: i32 = 999;

pub const MIN_UNTIL_NEXT_LEVEL: i32 = 0;
pub const MAX_UNTIL_NEXT_LEVEL: i32 = 10_000_000;

// Birthdays must fall strictly inside this range of years.
pub const FIRST_BIRTH_YEAR: i32 = 2000;
pub const LAST_BIRTH_YEAR: i32 = 3000;

/// Level reached with the given amount of experience:
/// `floor((sqrt(2500 + 200 * experience) - 50) / 100)`.
pub fn compute_level(experience: i32) -> i32 {
    let root = (2500.0 + 200.0 * f64::from(experience)).sqrt();
    ((root - 50.0) / 100.0).floor() as i32
}

/// Experience still missing to reach `level + 1`.
pub fn compute_until_next_level(level: i32, experience: i32) -> i32 {
    let next = 50 * (i64::from(level) + 1) * (i64::from(level) + 2);
    (next - i64::from(experience)) as i32
}

pub fn is_name_valid(name: &str) -> bool {
    is_length_valid(name, MAX_NAME_LENGTH)
}

pub fn is_title_valid(title: &str) -> bool {
    is_length_valid(title, MAX_TITLE_LENGTH)
}

pub fn is_experience_valid(experience: i32) -> bool {
    (MIN_EXPERIENCE..=MAX_EXPERIENCE).contains(&experience)
}

pub fn is_level_valid(level: i32) -> bool {
    (MIN_LEVEL..=MAX_LEVEL).contains(&level)
}

pub fn is_until_next_level_valid(until_next_level: i32) -> bool {
    (MIN_UNTIL_NEXT_LEVEL..=MAX_UNTIL_NEXT_LEVEL).contains(&until_next_level)
}

pub fn is_birthday_valid(birthday: &DateTime<Utc>) -> bool {
    match (
        start_of_year(FIRST_BIRTH_YEAR),
        start_of_year(LAST_BIRTH_YEAR),
    ) {
        (Some(first), Some(last)) => *birthday > first && *birthday < last,
        _ => false,
    }
}

/// A stored player is valid when every client supplied field passes its rule.
pub fn is_player_valid(player: &Player) -> bool {
    is_name_valid(&player.name)
        && is_title_valid(&player.title)
        && is_birthday_valid(&player.birthday)
        && is_experience_valid(player.experience)
}

/// Applies every present field of `patch` to `player`, one field at a time.
///
/// The first invalid field aborts with `InvalidArgument`. Fields applied
/// before it stay applied on `player`: callers must not persist a player
/// for which this returned an error.
pub fn apply_patch(player: &mut Player, patch: &PlayerPatch) -> Result<()> {
    if let Some(name) = &patch.name {
        if !is_name_valid(name) {
            return Err(AppError::invalid_argument(format!(
                "name must be 1 to {MAX_NAME_LENGTH} characters"
            )));
        }
        player.name = name.clone();
    }

    if let Some(title) = &patch.title {
        if !is_title_valid(title) {
            return Err(AppError::invalid_argument(format!(
                "title must be 1 to {MAX_TITLE_LENGTH} characters"
            )));
        }
        player.title = title.clone();
    }

    if let Some(race) = patch.race {
        player.race = race;
    }

    if let Some(profession) = patch.profession {
        player.profession = profession;
    }

    if let Some(birthday) = patch.birthday {
        if !is_birthday_valid(&birthday) {
            return Err(AppError::invalid_argument(format!(
                "birthday must be between the years {FIRST_BIRTH_YEAR} and {LAST_BIRTH_YEAR}"
            )));
        }
        player.birthday = birthday;
    }

    if let Some(banned) = patch.banned {
        player.banned = banned;
    }

    if let Some(experience) = patch.experience {
        apply_experience(player, experience)?;
    }

    Ok(())
}

/// Sets the experience and recomputes both derived fields from it.
pub fn apply_experience(player: &mut Player, experience: i32) -> Result<()> {
    if !is_experience_valid(experience) {
        return Err(AppError::invalid_argument(format!(
            "experience must be between {MIN_EXPERIENCE} and {MAX_EXPERIENCE}"
        )));
    }
    player.experience = experience;

    let level = compute_level(experience);
    if !is_level_valid(level) {
        return Err(AppError::invalid_argument(format!(
            "level {level} computed from experience {experience} is outside {MIN_LEVEL}..={MAX_LEVEL}"
        )));
    }
    player.level = level;

    let until_next_level = compute_until_next_level(level, experience);
    if !is_until_next_level_valid(until_next_level) {
        return Err(AppError::invalid_argument(format!(
            "until next level {until_next_level} is outside {MIN_UNTIL_NEXT_LEVEL}..={MAX_UNTIL_NEXT_LEVEL}"
        )));
    }
    player.until_next_level = until_next_level;

    Ok(())
}

/// Builds a new, not yet stored, player from a creation payload.
pub fn build_player(patch: PlayerPatch) -> Result<Player> {
    let mut player = Player {
        id: None,
        name: required(patch.name, "name")?,
        title: required(patch.title, "title")?,
        race: required(patch.race, "race")?,
        profession: required(patch.profession, "profession")?,
        birthday: required(patch.birthday, "birthday")?,
        banned: patch.banned.unwrap_or(false),
        experience: required(patch.experience, "experience")?,
        level: 0,
        until_next_level: 0,
    };

    if !is_player_valid(&player) {
        return Err(AppError::invalid_argument("player has invalid fields"));
    }

    let experience = player.experience;
    apply_experience(&mut player, experience)?;

    Ok(player)
}

fn required<T>(value: Option<T>, field: &str) -> Result<T> {
    value.ok_or_else(|| AppError::invalid_argument(format!("{field} is required")))
}

fn is_length_valid(value: &str, max_length: usize) -> bool {
    let length = value.chars().count();
    length > 0 && length <= max_length
}

fn start_of_year(year: i32) -> Option<DateTime<Utc>> {
    NaiveDate::from_ymd_opt(year, 1, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|date| date.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::players::model::{Profession, Race};
    use chrono::{Duration, TimeZone};

    fn sample_player() -> Player {
        Player {
            id: Some(1),
            name: "Legolas".to_string(),
            title: "Prince of Mirkwood".to_string(),
            race: Race::Elf,
            profession: Profession::Rogue,
            birthday: Utc.with_ymd_and_hms(2008, 6, 15, 0, 0, 0).unwrap(),
            banned: false,
            experience: 1500,
            level: compute_level(1500),
            until_next_level: compute_until_next_level(compute_level(1500), 1500),
        }
    }

    fn creation_patch() -> PlayerPatch {
        PlayerPatch {
            name: Some("Frodo".to_string()),
            title: Some("Ring bearer".to_string()),
            race: Some(Race::Hobbit),
            profession: Some(Profession::Rogue),
            birthday: Some(Utc.with_ymd_and_hms(2012, 9, 22, 0, 0, 0).unwrap()),
            banned: None,
            experience: Some(3000),
        }
    }

    #[test]
    fn level_formula() {
        assert_eq!(compute_level(0), 0);
        assert_eq!(compute_level(99), 0);
        assert_eq!(compute_level(100), 1);
        assert_eq!(compute_level(299), 1);
        assert_eq!(compute_level(300), 2);
        assert_eq!(compute_level(MAX_EXPERIENCE), 446);
    }

    #[test]
    fn until_next_level_formula() {
        assert_eq!(compute_until_next_level(0, 0), 100);
        assert_eq!(compute_until_next_level(1, 150), 150);
        assert_eq!(compute_until_next_level(446, MAX_EXPERIENCE), 12_800);
    }

    #[test]
    fn experience_bounds_are_inclusive() {
        assert!(is_experience_valid(0));
        assert!(is_experience_valid(MAX_EXPERIENCE));
        assert!(!is_experience_valid(-1));
        assert!(!is_experience_valid(MAX_EXPERIENCE + 1));
    }

    #[test]
    fn string_lengths_count_characters() {
        assert!(is_name_valid("Éowyn"));
        assert!(is_name_valid("abcdefghijkl"));
        assert!(!is_name_valid("abcdefghijklm"));
        assert!(!is_name_valid(""));
        assert!(is_title_valid(&"t".repeat(30)));
        assert!(!is_title_valid(&"t".repeat(31)));
    }

    #[test]
    fn birthday_bounds_are_exclusive() {
        let first = Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap();
        let last = Utc.with_ymd_and_hms(3000, 1, 1, 0, 0, 0).unwrap();

        assert!(!is_birthday_valid(&first));
        assert!(is_birthday_valid(&(first + Duration::days(1))));
        assert!(!is_birthday_valid(&last));
        assert!(is_birthday_valid(&(last - Duration::days(1))));
        assert!(!is_birthday_valid(
            &Utc.with_ymd_and_hms(1999, 12, 31, 0, 0, 0).unwrap()
        ));
    }

    #[test]
    fn patch_only_overwrites_present_fields() {
        let mut player = sample_player();
        let patch = PlayerPatch {
            title: Some("Archer".to_string()),
            banned: Some(true),
            ..Default::default()
        };

        apply_patch(&mut player, &patch).unwrap();

        assert_eq!(player.title, "Archer");
        assert!(player.banned);
        assert_eq!(player.name, "Legolas");
        assert_eq!(player.experience, 1500);
    }

    #[test]
    fn patch_with_experience_recomputes_level() {
        let mut player = sample_player();
        let patch = PlayerPatch {
            experience: Some(50_000),
            ..Default::default()
        };

        apply_patch(&mut player, &patch).unwrap();

        assert_eq!(player.experience, 50_000);
        assert_eq!(player.level, compute_level(50_000));
        assert_eq!(
            player.until_next_level,
            compute_until_next_level(player.level, 50_000)
        );
    }

    #[test]
    fn patch_stops_at_first_invalid_field() {
        let mut player = sample_player();
        let patch = PlayerPatch {
            name: Some("Thranduil".to_string()),
            title: Some("x".repeat(31)),
            experience: Some(200),
            ..Default::default()
        };

        let err = apply_patch(&mut player, &patch).unwrap_err();

        assert!(matches!(err, AppError::InvalidArgument { .. }));
        // fields before the failure were applied, the ones after were not
        assert_eq!(player.name, "Thranduil");
        assert_eq!(player.title, "Prince of Mirkwood");
        assert_eq!(player.experience, 1500);
    }

    #[test]
    fn patch_rejects_out_of_range_experience() {
        let mut player = sample_player();
        let patch = PlayerPatch {
            experience: Some(MAX_EXPERIENCE + 1),
            ..Default::default()
        };

        assert!(apply_patch(&mut player, &patch).is_err());
        assert_eq!(player.experience, 1500);
    }

    #[test]
    fn experience_below_first_level_is_rejected() {
        let mut player = sample_player();

        let err = apply_experience(&mut player, 50).unwrap_err();

        assert!(matches!(err, AppError::InvalidArgument { .. }));
        assert_eq!(player.level, compute_level(1500));
    }

    #[test]
    fn build_player_derives_level() {
        let player = build_player(creation_patch()).unwrap();

        assert_eq!(player.id, None);
        assert!(!player.banned);
        assert_eq!(player.level, 7);
        assert_eq!(player.until_next_level, 600);
    }

    #[test]
    fn build_player_requires_fields() {
        let patch = PlayerPatch {
            race: None,
            ..creation_patch()
        };

        let err = build_player(patch).unwrap_err();
        assert_eq!(err.to_string(), "Invalid Argument: 'race is required'");
    }

    #[test]
    fn build_player_validates_fields() {
        let patch = PlayerPatch {
            birthday: Some(Utc.with_ymd_and_hms(1990, 1, 1, 0, 0, 0).unwrap()),
            ..creation_patch()
        };

        assert!(build_player(patch).is_err());
    }

    #[test]
    fn player_validity() {
        let mut player = sample_player();
        assert!(is_player_valid(&player));

        player.name = String::new();
        assert!(!is_player_valid(&player));
    }
}
