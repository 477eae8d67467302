use crate::players::model::{Player, PlayerFilter, PlayerOrder};

pub const DEFAULT_PAGE_NUMBER: i32 = 0;
pub const DEFAULT_PAGE_SIZE: i32 = 3;

impl PlayerFilter {
    /// True when the player satisfies every criterion that is set.
    pub fn matches(&self, player: &Player) -> bool {
        if let Some(name) = &self.name {
            if !player.name.contains(name.as_str()) {
                return false;
            }
        }
        if let Some(title) = &self.title {
            if !player.title.contains(title.as_str()) {
                return false;
            }
        }
        if self.race.is_some_and(|race| player.race != race) {
            return false;
        }
        if self
            .profession
            .is_some_and(|profession| player.profession != profession)
        {
            return false;
        }

        let birthday = player.birthday.timestamp_millis();
        if self.after.is_some_and(|after| birthday < after) {
            return false;
        }
        if self.before.is_some_and(|before| birthday > before) {
            return false;
        }

        if self.banned.is_some_and(|banned| player.banned != banned) {
            return false;
        }
        if self.min_experience.is_some_and(|min| player.experience < min) {
            return false;
        }
        if self.max_experience.is_some_and(|max| player.experience > max) {
            return false;
        }
        if self.min_level.is_some_and(|min| player.level < min) {
            return false;
        }
        if self.max_level.is_some_and(|max| player.level > max) {
            return false;
        }

        true
    }
}

pub fn filter_players<I>(players: I, filter: &PlayerFilter) -> Vec<Player>
where
    I: IntoIterator<Item = Player>,
{
    players
        .into_iter()
        .filter(|player| filter.matches(player))
        .collect()
}

/// Stable ascending sort. Leaves the slice untouched without an order.
pub fn sort_players(players: &mut [Player], order: Option<PlayerOrder>) {
    let Some(order) = order else {
        return;
    };

    match order {
        PlayerOrder::Id => players.sort_by_key(|player| player.id),
        PlayerOrder::Name => players.sort_by(|a, b| a.name.cmp(&b.name)),
        PlayerOrder::Experience => players.sort_by_key(|player| player.experience),
        PlayerOrder::Birthday => players.sort_by_key(|player| player.birthday),
    }
}

/// Returns the zero based page `page_number` of `page_size` players.
///
/// The end of the page is clamped to the slice length. A negative page, a
/// non positive size or a page starting past the end yields an empty page.
pub fn get_page(
    players: &[Player],
    page_number: Option<i32>,
    page_size: Option<i32>,
) -> &[Player] {
    let page = i64::from(page_number.unwrap_or(DEFAULT_PAGE_NUMBER));
    let size = i64::from(page_size.unwrap_or(DEFAULT_PAGE_SIZE));
    let len = players.len() as i64;

    if page < 0 || size <= 0 {
        return &[];
    }

    let from = page * size;
    if from >= len {
        return &[];
    }
    let to = (from + size).min(len);

    &players[from as usize..to as usize]
}
