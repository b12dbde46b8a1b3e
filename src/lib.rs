pub mod ai;
pub mod catalog;
pub mod error;
pub mod favorites;
pub mod session;
pub mod timer;
pub mod types;

pub use ai::{
    AiCache, AiClient, AiConfig, AiRecipeGenerator, CachingAiClient, FakeClient, RecipeGenerator,
};
pub use catalog::{builtin_recipes, find_builtin};
pub use error::{FavoritesError, GenerateError};
pub use favorites::{
    FavoritesStore, GuestFavorites, JsonFileStore, MemoryLocal, MemoryRemote, MergeReport,
    RemoteFavorites, RestConfig, RestFavorites,
};
pub use session::RecipeSession;
pub use timer::{StepTimerEngine, TimerEvent, TimerState};
pub use types::{
    Cooktop, Identity, Language, Recipe, RecipeRewrite, Step, Substitution, TranslatedRecipe,
};
