pub mod catalogue;
pub mod compare;
pub mod detail;
pub mod episodes;
pub mod locations;

pub use catalogue::{Action, Catalogue, render_suggestions};
pub use compare::{Comparison, Slot};
pub use detail::{CharacterDetail, Detail};
pub use episodes::EpisodeBrowser;
pub use locations::LocationList;
