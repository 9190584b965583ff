use std::collections::HashMap;
use std::f64::consts::TAU;

use macroquad::math::{DVec2, dvec2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use shared::{ChatEvent, Identity};
use slotmap::SlotMap;

use super::chat_feed::{ChatFeed, ChatLine};
use super::collision::{self, Contact};
use super::food::FoodField;
use super::leaderboard::{Leaderboard, LeaderboardEntry};
use super::snake::{Segment, Snake, SnakeKey};
use super::spawn_queue::{SpawnQueue, SpawnRequest, SpawnSender, spawn_queue};
use super::steering::Surroundings;
use crate::config::{SNAKE_SPAWN_MARGIN, SimulationConfig, parse_hex_color};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Uniform point at least `margin` away from every wall.
    pub fn random_point(&self, margin: f64, rng: &mut impl Rng) -> DVec2 {
        dvec2(
            rng.random_range(margin..=self.width - margin),
            rng.random_range(margin..=self.height - margin),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorldState {
    Stopped,
    Running,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnOutcome {
    Spawned(SnakeKey),
    Respawned(SnakeKey),
    AlreadyAlive(SnakeKey),
}

#[derive(Debug, Clone)]
pub struct AgentView {
    pub key: SnakeKey,
    pub name: String,
    pub color: u32,
    pub segments: Vec<Segment>,
    pub heading: f64,
    pub score: u64,
    pub alive: bool,
}

#[derive(Debug, Clone)]
pub struct FoodView {
    pub pos: DVec2,
    pub radius: f64,
    pub color: u32,
    pub pulse: f64,
}

/// Frame-consistent copy of everything the renderer needs.
#[derive(Debug, Clone)]
pub struct WorldSnapshot {
    pub agents: Vec<AgentView>,
    pub food: Vec<FoodView>,
    pub bounds: Bounds,
    pub tick: u64,
    pub state: WorldState,
}

pub struct World {
    config: SimulationConfig,
    state: WorldState,
    bounds: Bounds,
    snakes: SlotMap<SnakeKey, Snake>,
    identities: HashMap<Identity, SnakeKey>,
    colors: HashMap<Identity, usize>,
    next_color: usize,
    food: FoodField,
    feed: ChatFeed,
    queue: SpawnQueue,
    sender: SpawnSender,
    leaderboard: Leaderboard,
    tick: u64,
    rng: StdRng,
}

impl World {
    pub fn new(config: &SimulationConfig) -> Self {
        let bounds = Bounds::new(config.world_width, config.world_height);
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let (sender, queue) = spawn_queue();

        Self {
            config: config.clone(),
            state: WorldState::Stopped,
            bounds,
            snakes: SlotMap::with_key(),
            identities: HashMap::new(),
            colors: HashMap::new(),
            next_color: 0,
            food: FoodField::new(config, bounds),
            feed: ChatFeed::new(config.chat.max_messages),
            queue,
            sender,
            leaderboard: Leaderboard::new(),
            tick: 0,
            rng,
        }
    }

    pub fn state(&self) -> WorldState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == WorldState::Running
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn food_count(&self) -> usize {
        self.food.len()
    }

    pub fn snake_count(&self) -> usize {
        self.snakes.len()
    }

    /// Live snakes as of the last leaderboard recomputation.
    pub fn live_count(&self) -> usize {
        self.leaderboard.live_count()
    }

    pub fn snake(&self, identity: &Identity) -> Option<&Snake> {
        self.identities
            .get(identity)
            .and_then(|key| self.snakes.get(*key))
    }

    /// Producer handle for chat threads.
    pub fn sender(&self) -> SpawnSender {
        self.sender.clone()
    }

    /// Queues a spawn request for the next tick. Returns false for a malformed event.
    pub fn on_chat_event(
        &self,
        identity: &str,
        display_name: &str,
        color_hint: Option<&str>,
    ) -> bool {
        let mut event = ChatEvent::new(identity, display_name);
        if let Some(hint) = color_hint {
            event = event.with_color_hint(hint);
        }
        self.sender.send(event)
    }

    pub fn start(&mut self) {
        if self.state == WorldState::Running {
            return;
        }

        self.snakes.clear();
        self.identities.clear();
        self.food.clear();
        self.feed.clear();
        self.leaderboard.clear();
        self.tick = 0;
        let dropped = self.queue.discard();
        if dropped > 0 {
            tracing::debug!("Discarded {dropped} spawn requests queued while stopped");
        }

        let initial_food = self.config.initial_food.min(self.config.max_food);
        self.food.seed(initial_food, &mut self.rng);

        self.state = WorldState::Running;
        tracing::info!(
            width = self.bounds.width,
            height = self.bounds.height,
            food = self.food.len(),
            "World started"
        );
    }

    pub fn stop(&mut self) {
        if self.state == WorldState::Stopped {
            return;
        }
        self.state = WorldState::Stopped;
        self.queue.discard();
        tracing::info!(tick = self.tick, snakes = self.snakes.len(), "World stopped");
    }

    pub fn tick(&mut self, dt: f64) {
        if self.state != WorldState::Running {
            return;
        }

        self.food.update();
        self.food.try_spawn(&mut self.rng);

        for request in self.queue.drain() {
            self.handle_chat(request);
        }

        let food_positions = self.food.positions();
        let heads: Vec<(SnakeKey, DVec2)> = self
            .snakes
            .iter()
            .filter(|(_, snake)| snake.alive)
            .map(|(key, snake)| (key, snake.head()))
            .collect();
        let surroundings = Surroundings {
            food: &food_positions,
            heads: &heads,
            bounds: self.bounds,
        };
        for (key, snake) in self.snakes.iter_mut() {
            snake.advance(key, dt, self.config.tick_rate, &surroundings, &mut self.rng);
        }

        let report = collision::resolve(&mut self.snakes, &mut self.food);
        for kill in &report.kills {
            tracing::debug!(
                eater = %self.snakes[kill.eater].name,
                victim = %self.snakes[kill.victim].name,
                gained = kill.gained,
                "Snake eaten"
            );
        }
        for (key, contact) in &report.deaths {
            let cause = match contact {
                Contact::Head(_) => "head-on",
                Contact::Body(..) => "body",
                Contact::SelfBody(_) => "self",
            };
            tracing::debug!(name = %self.snakes[*key].name, cause, "Snake died");
        }

        self.tick += 1;
        if self.tick % self.config.leaderboard_interval == 0 {
            self.leaderboard.recompute(&self.snakes);
        }
    }

    /// Spawns for the author and, when the request carries text, appends it to the feed.
    fn handle_chat(&mut self, mut request: SpawnRequest) {
        let message = std::mem::take(&mut request.message);
        let name = request.display_name.clone();
        let key = match self.handle_spawn(request) {
            SpawnOutcome::Spawned(key)
            | SpawnOutcome::Respawned(key)
            | SpawnOutcome::AlreadyAlive(key) => key,
        };
        if !message.is_empty() {
            let color = self.snakes[key].color;
            self.feed.push(ChatLine {
                name,
                message,
                color,
            });
        }
    }

    /// New identity spawns, dead identity respawns, live identity is left alone.
    pub fn handle_spawn(&mut self, request: SpawnRequest) -> SpawnOutcome {
        let existing = self.identities.get(&request.identity).copied();
        if let Some(key) = existing {
            if self.snakes.get(key).is_some_and(|snake| snake.alive) {
                return SpawnOutcome::AlreadyAlive(key);
            }
            self.snakes.remove(key);
        }

        let color = self.color_for(&request.identity, request.color_hint.as_deref());
        let head = self.bounds.random_point(SNAKE_SPAWN_MARGIN, &mut self.rng);
        let heading = self.rng.random_range(0.0..TAU);
        let snake = Snake::new(
            request.identity.clone(),
            request.display_name,
            color,
            head,
            heading,
            &self.config,
            &mut self.rng,
        );
        let key = self.snakes.insert(snake);
        self.identities.insert(request.identity.clone(), key);

        let name = &self.snakes[key].name;
        if existing.is_some() {
            tracing::info!(identity = %request.identity, %name, "Snake respawned");
            SpawnOutcome::Respawned(key)
        } else {
            tracing::info!(identity = %request.identity, %name, "New snake");
            SpawnOutcome::Spawned(key)
        }
    }

    fn color_for(&mut self, identity: &Identity, hint: Option<&str>) -> usize {
        let palette = &self.config.snake_colors;
        let hinted = hint
            .and_then(parse_hex_color)
            .and_then(|rgb| palette.iter().position(|&c| c == rgb));
        if let Some(index) = hinted {
            self.colors.insert(identity.clone(), index);
            return index;
        }
        if let Some(&index) = self.colors.get(identity) {
            return index;
        }
        let index = self.next_color % palette.len();
        self.next_color += 1;
        self.colors.insert(identity.clone(), index);
        index
    }

    /// Recent chat lines, oldest first.
    pub fn chat_feed(&self) -> impl Iterator<Item = &ChatLine> {
        self.feed.iter()
    }

    pub fn leaderboard(&self, limit: usize) -> &[LeaderboardEntry] {
        self.leaderboard.top(limit)
    }

    pub fn snake_color(&self, index: usize) -> u32 {
        let palette = &self.config.snake_colors;
        palette[index % palette.len()]
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        let food_palette = &self.config.food_colors;
        WorldSnapshot {
            agents: self
                .snakes
                .iter()
                .map(|(key, snake)| AgentView {
                    key,
                    name: snake.name.clone(),
                    color: self.snake_color(snake.color),
                    segments: snake.segments.clone(),
                    heading: snake.heading,
                    score: snake.score,
                    alive: snake.alive,
                })
                .collect(),
            food: self
                .food
                .iter()
                .map(|(_, item)| FoodView {
                    pos: item.pos,
                    radius: item.radius,
                    color: food_palette[item.color % food_palette.len()],
                    pulse: item.pulse,
                })
                .collect(),
            bounds: self.bounds,
            tick: self.tick,
            state: self.state,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const DT: f64 = 1.0 / 60.0;

    fn quiet_config() -> SimulationConfig {
        SimulationConfig {
            seed: Some(42),
            initial_food: 0,
            food_spawn_rate: 0.0,
            ..SimulationConfig::default()
        }
    }

    fn id(raw: &str) -> Identity {
        Identity::parse(raw).unwrap()
    }

    #[test]
    fn test_spawn_new_identity_then_noop_while_alive() {
        let mut world = World::new(&quiet_config());
        world.start();

        assert!(world.on_chat_event("u1", "Fox", None));
        world.tick(DT);
        assert_eq!(world.snake_count(), 1);
        let first = world.identities[&id("u1")];
        assert_eq!(world.snakes[first].name, "Fox");
        assert!(world.snakes[first].alive);

        assert!(world.on_chat_event("u1", "Wolf", None));
        world.tick(DT);
        assert_eq!(world.snake_count(), 1);
        assert_eq!(world.identities[&id("u1")], first);
        assert_eq!(world.snakes[first].name, "Fox");
    }

    #[test]
    fn test_dead_identity_respawns_fresh() {
        let mut world = World::new(&quiet_config());
        world.start();
        world.on_chat_event("u1", "Fox", None);
        world.tick(DT);
        let old = world.identities[&id("u1")];
        world.snakes[old].score = 17;
        world.snakes[old].die();

        let outcome = world.handle_spawn(SpawnRequest {
            identity: id("u1"),
            display_name: "Vixen".to_string(),
            message: String::new(),
            color_hint: None,
        });
        let SpawnOutcome::Respawned(new) = outcome else {
            panic!("expected respawn, got {outcome:?}");
        };
        assert_ne!(new, old);
        assert!(world.snakes.get(old).is_none());
        let snake = world.snake(&id("u1")).unwrap();
        assert!(snake.alive);
        assert_eq!(snake.score, 0);
        assert_eq!(snake.name, "Vixen");
        assert_eq!(snake.len(), world.config.initial_snake_size);
        assert_eq!(world.snake_count(), 1);
    }

    #[test]
    fn test_blank_identity_rejected_at_boundary() {
        let mut world = World::new(&quiet_config());
        world.start();
        assert!(!world.on_chat_event("  ", "Ghost", None));
        world.tick(DT);
        assert_eq!(world.snake_count(), 0);
    }

    #[test]
    fn test_blank_name_falls_back_to_identity() {
        let mut world = World::new(&quiet_config());
        world.start();
        world.on_chat_event("u7", " ", None);
        world.tick(DT);
        assert_eq!(world.snake(&id("u7")).unwrap().name, "u7");
    }

    #[test]
    fn test_food_saturates_at_cap() {
        let config = SimulationConfig {
            max_food: 5,
            food_spawn_rate: 1.0,
            ..quiet_config()
        };
        let mut world = World::new(&config);
        world.start();
        assert_eq!(world.food_count(), 0);
        for _ in 0..50 {
            world.tick(DT);
            assert!(world.food_count() <= 5);
        }
        assert_eq!(world.food_count(), 5);
    }

    #[test]
    fn test_start_seeds_initial_food_within_cap() {
        let config = SimulationConfig {
            initial_food: 30,
            max_food: 12,
            ..quiet_config()
        };
        let mut world = World::new(&config);
        world.start();
        assert_eq!(world.food_count(), 12);
    }

    #[test]
    fn test_pickup_removes_item_and_scores() {
        let mut world = World::new(&quiet_config());
        world.start();
        world.on_chat_event("u1", "Fox", None);
        world.tick(DT);
        let key = world.identities[&id("u1")];
        let head = world.snakes[key].head();
        let heading = world.snakes[key].heading;
        let ahead = head + dvec2(heading.cos(), heading.sin()) * 3.0;
        let item = world.food.insert_at(ahead, 3);
        let score_before = world.snakes[key].score;
        let len_before = world.snakes[key].len();

        world.tick(DT);

        assert!(world.food.get(item).is_none());
        assert!(world.snapshot().food.is_empty());
        assert_eq!(world.snakes[key].score, score_before + 3);
        assert_eq!(world.snakes[key].len(), len_before + 1);
    }

    #[test]
    fn test_population_invariants_over_time() {
        let config = SimulationConfig {
            world_width: 500.0,
            world_height: 400.0,
            food_spawn_rate: 0.5,
            initial_food: 30,
            ..quiet_config()
        };
        let mut world = World::new(&config);
        world.start();
        for i in 0..12 {
            world.on_chat_event(&format!("u{i}"), &format!("Snake {i}"), None);
        }

        let mut lengths: HashMap<SnakeKey, (usize, bool)> = HashMap::new();
        for _ in 0..600 {
            world.tick(DT);
            assert!(world.food_count() <= config.max_food);
            for (key, snake) in world.snakes.iter() {
                assert!(snake.heading >= 0.0 && snake.heading < TAU);
                assert!(snake.len() >= config.initial_snake_size);
                if let Some(&(before, was_alive)) = lengths.get(&key) {
                    if was_alive {
                        assert!(snake.len() >= before);
                    } else {
                        assert_eq!(snake.len(), before);
                        assert!(!snake.alive);
                    }
                }
                lengths.insert(key, (snake.len(), snake.alive));
            }
        }
    }

    #[test]
    fn test_stop_keeps_state_and_start_resets() {
        let config = SimulationConfig {
            initial_food: 10,
            ..quiet_config()
        };
        let mut world = World::new(&config);
        world.start();
        world.on_chat_event("u1", "Fox", None);
        world.tick(DT);
        world.stop();
        assert_eq!(world.state(), WorldState::Stopped);
        assert_eq!(world.snake_count(), 1);

        // Ticks are ignored and requests made while stopped never land
        let tick = world.tick_count();
        world.on_chat_event("u2", "Owl", None);
        world.tick(DT);
        assert_eq!(world.tick_count(), tick);

        world.start();
        assert_eq!(world.snake_count(), 0);
        assert_eq!(world.tick_count(), 0);
        assert_eq!(world.food_count(), 10);
        world.tick(DT);
        assert_eq!(world.snake_count(), 0);
    }

    #[test]
    fn test_colors_hint_then_sticky_then_round_robin() {
        let mut world = World::new(&quiet_config());
        world.start();
        world.on_chat_event("a", "A", None);
        world.on_chat_event("b", "B", Some("#ff9800"));
        world.on_chat_event("c", "C", Some("#123456"));
        world.tick(DT);

        let palette = world.config.snake_colors.clone();
        assert_eq!(world.snake(&id("a")).unwrap().color, 0);
        assert_eq!(palette[world.snake(&id("b")).unwrap().color], 0xFF9800);
        assert_eq!(world.snake(&id("c")).unwrap().color, 1);

        world.stop();
        world.start();
        world.on_chat_event("c", "C", None);
        world.tick(DT);
        assert_eq!(world.snake(&id("c")).unwrap().color, 1);
    }

    #[test]
    fn test_leaderboard_recomputed_on_interval() {
        let config = SimulationConfig {
            leaderboard_interval: 3,
            ..quiet_config()
        };
        let mut world = World::new(&config);
        world.start();
        world.on_chat_event("u1", "Fox", None);
        world.tick(DT);
        assert!(world.leaderboard(10).is_empty());
        world.tick(DT);
        world.tick(DT);
        let board = world.leaderboard(10);
        assert_eq!(board.len(), 1);
        assert_eq!(board[0].name, "Fox");
        assert_eq!(board[0].rank, 1);
    }

    #[test]
    fn test_live_count_follows_leaderboard_interval() {
        let config = SimulationConfig {
            leaderboard_interval: 3,
            ..quiet_config()
        };
        let mut world = World::new(&config);
        world.start();
        world.on_chat_event("u1", "Fox", None);
        world.on_chat_event("u2", "Owl", None);
        world.tick(DT);
        assert_eq!(world.live_count(), 0);
        world.tick(DT);
        world.tick(DT);
        assert_eq!(world.live_count(), 2);

        let key = world.identities[&id("u1")];
        world.snakes[key].die();
        world.tick(DT);
        assert_eq!(world.live_count(), 2);
        world.tick(DT);
        world.tick(DT);
        assert_eq!(world.live_count(), 1);
    }

    #[test]
    fn test_chat_feed_is_bounded_and_colored() {
        let mut config = quiet_config();
        config.chat.max_messages = 3;
        let mut world = World::new(&config);
        world.start();
        let sender = world.sender();
        sender.send(ChatEvent::new("a", "A").with_message("first"));
        sender.send(ChatEvent::new("b", "B").with_color_hint("#ff9800").with_message("hi"));
        sender.send(ChatEvent::new("a", "A"));
        world.tick(DT);

        let lines: Vec<_> = world.chat_feed().cloned().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].message, "first");
        assert_eq!(lines[1].name, "B");
        assert_eq!(world.snake_color(lines[1].color), 0xFF9800);

        for i in 0..10 {
            sender.send(ChatEvent::new("a", "A").with_message(format!("line {i}")));
            world.tick(DT);
            assert!(world.chat_feed().count() <= 3);
        }
        let last: Vec<_> = world.chat_feed().map(|l| l.message.clone()).collect();
        assert_eq!(last, ["line 7", "line 8", "line 9"]);

        world.stop();
        world.start();
        assert_eq!(world.chat_feed().count(), 0);
    }

    #[test]
    fn test_snapshot_resolves_palette_colors() {
        let config = SimulationConfig {
            initial_food: 3,
            ..quiet_config()
        };
        let mut world = World::new(&config);
        world.start();
        world.on_chat_event("u1", "Fox", None);
        world.tick(DT);
        let snapshot = world.snapshot();
        assert_eq!(snapshot.agents.len(), 1);
        assert_eq!(snapshot.agents[0].color, config.snake_colors[0]);
        assert_eq!(snapshot.food.len(), world.food_count());
        assert!(
            snapshot
                .food
                .iter()
                .all(|f| config.food_colors.contains(&f.color))
        );
        assert_eq!(snapshot.tick, 1);
    }
}
