// Application layer - Use case interactors

pub mod container;
pub mod cut_interactor;
pub mod inspect_interactor;

// Re-export interactors
pub use container::{AppContainer, DefaultAppContainer};
pub use cut_interactor::{CutInteractor, CutRequest};
pub use inspect_interactor::{InspectInteractor, InspectResponse};
