use chrono::{Duration, TimeZone, Utc};
use mahjong_league::league::{
    DraftHand, GameForm, GameRecord, Player, PlayerId, RuleSettings, Yakuman, YakumanEvent,
};

/// Fluent builder for a league history snapshot.
///
/// Every game goes through strict finalization, so hands must balance.
pub struct HistoryBuilder {
    players: Vec<Player>,
    games: Vec<GameRecord>,
    rules: RuleSettings,
}

#[allow(dead_code)]
impl HistoryBuilder {
    pub fn new() -> Self {
        Self {
            players: Vec::new(),
            games: Vec::new(),
            rules: RuleSettings::default(),
        }
    }

    pub fn with_four_players(self) -> Self {
        self.with_players(&["a", "b", "c", "d"])
    }

    pub fn with_players(mut self, ids: &[&str]) -> Self {
        self.players
            .extend(ids.iter().map(|id| Player::new(*id, id.to_uppercase())));
        self
    }

    pub fn with_rules(mut self, rules: RuleSettings) -> Self {
        self.rules = rules;
        self
    }

    /// Adds a session for the first four players, one hand per score row.
    pub fn game(self, date: &str, hands: &[[i32; 4]]) -> Self {
        let roster: Vec<String> = self.players.iter().take(4).map(|p| p.id.clone()).collect();
        let roster: Vec<&str> = roster.iter().map(String::as_str).collect();
        self.game_with_roster(date, &roster, hands)
    }

    pub fn game_with_roster(mut self, date: &str, roster: &[&str], hands: &[[i32; 4]]) -> Self {
        let player_ids: Vec<PlayerId> = roster.iter().map(|id| id.to_string()).collect();
        let form = GameForm {
            date: date.to_string(),
            player_ids: player_ids.clone(),
            rules: self.rules.clone(),
            hands: hands
                .iter()
                .map(|scores| DraftHand {
                    raw_scores: player_ids
                        .iter()
                        .cloned()
                        .zip(scores.iter().map(|&s| Some(s)))
                        .collect(),
                    ..DraftHand::default()
                })
                .collect(),
        };

        let number = self.games.len();
        let created_at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
            + Duration::hours(number as i64);
        let record = form
            .finalize(format!("game-{}", number + 1), created_at)
            .expect("test game should be valid");
        self.games.push(record);
        self
    }

    /// Records a yakuman for `player_id` in the latest hand of the latest game.
    pub fn yakuman(mut self, player_id: &str, kind: Yakuman) -> Self {
        let hand = self
            .games
            .last_mut()
            .and_then(|game| game.hands.last_mut())
            .expect("add a game before recording a yakuman");
        hand.yakuman_events.push(YakumanEvent {
            player_id: player_id.to_string(),
            yakumans: [kind].into_iter().collect(),
        });
        self
    }

    pub fn build(self) -> (Vec<Player>, Vec<GameRecord>) {
        (self.players, self.games)
    }
}

impl Default for HistoryBuilder {
    fn default() -> Self {
        Self::new()
    }
}
