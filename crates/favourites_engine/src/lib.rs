//! Favourites engine: remote data source and async effect execution.
mod engine;
mod http;
mod source;
mod types;

pub use engine::{EngineCommand, EngineError, EngineHandle};
pub use http::{ReqwestSource, SourceSettings};
pub use source::FavouritesSource;
pub use types::{
    EngineEvent, Envelope, Favourite, FavouriteId, RemoteError, RequestId, TransportFailure,
    TransportKind,
};
