use serde::{Deserialize, Serialize};

/// Paged list response from `GET /games`.
#[derive(Debug, Deserialize)]
pub struct GamesPage {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    #[serde(default)]
    pub results: Vec<ApiGame>,
}

/// A game as RAWG returns it, from either the detail or the list endpoint.
/// List results omit the description fields.
#[derive(Debug, Deserialize, Clone)]
pub struct ApiGame {
    pub id: u64,
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub description_raw: Option<String>,
    #[serde(default)]
    pub released: Option<String>,
    #[serde(default)]
    pub background_image: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub rating_top: Option<u32>,
    #[serde(default)]
    pub ratings_count: Option<u32>,
    #[serde(default)]
    pub metacritic: Option<u32>,
    #[serde(default)]
    pub platforms: Option<Vec<PlatformEntry>>,
    #[serde(default)]
    pub genres: Option<Vec<NamedRef>>,
}

/// Wrapper RAWG puts around each platform of a game.
#[derive(Debug, Deserialize, Clone)]
pub struct PlatformEntry {
    pub platform: NamedRef,
}

/// `{id, name, slug}` triple used for platforms and genres.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedRef {
    pub id: u64,
    pub name: String,
    pub slug: String,
}

/// Normalized game metadata. Built fresh from each API response and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameRecord {
    pub id: u64,
    pub slug: String,
    pub name: String,
    pub description: Option<String>,
    pub released: Option<String>,
    pub rating: f64,
    pub rating_top: u32,
    pub ratings_count: u32,
    pub metacritic: Option<u32>,
    pub image: Option<String>,
    pub platforms: Vec<NamedRef>,
    pub genres: Vec<NamedRef>,
}

impl GameRecord {
    /// Whether the game is listed on the platform with this RAWG id.
    pub fn on_platform(&self, platform_id: u64) -> bool {
        self.platforms.iter().any(|p| p.id == platform_id)
    }

    /// Genre names joined for display, e.g. "Action, Adventure".
    pub fn genre_names(&self) -> String {
        self.genres
            .iter()
            .map(|g| g.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Release year, if the release date is known.
    pub fn release_year(&self) -> Option<&str> {
        self.released.as_deref().and_then(|d| d.get(..4))
    }
}

impl From<ApiGame> for GameRecord {
    fn from(game: ApiGame) -> Self {
        let description = game
            .description_raw
            .filter(|d| !d.trim().is_empty())
            .or(game.description.filter(|d| !d.trim().is_empty()));

        let platforms = dedup_by_id(
            game.platforms
                .unwrap_or_default()
                .into_iter()
                .map(|p| p.platform),
        );
        let genres = dedup_by_id(game.genres.unwrap_or_default());

        Self {
            id: game.id,
            slug: game.slug,
            name: game.name,
            description,
            released: game.released,
            rating: game.rating.unwrap_or(0.0),
            rating_top: game.rating_top.unwrap_or(0),
            ratings_count: game.ratings_count.unwrap_or(0),
            metacritic: game.metacritic,
            image: game.background_image,
            platforms,
            genres,
        }
    }
}

fn dedup_by_id(refs: impl IntoIterator<Item = NamedRef>) -> Vec<NamedRef> {
    let mut out: Vec<NamedRef> = Vec::new();
    for r in refs {
        if !out.iter().any(|o| o.id == r.id) {
            out.push(r);
        }
    }
    out
}
