use crate::{Favourite, FavouriteId, RemoteError};

/// Remote store of the user's collected websites.
#[async_trait::async_trait]
pub trait FavouritesSource: Send + Sync {
    /// Lists every collected website, in server order.
    async fn fetch_favourites(&self) -> Result<Vec<Favourite>, RemoteError>;

    /// Deletes one collected website. `RemoteError::Server` means the server
    /// understood the request and refused it.
    async fn delete_favourite(&self, id: FavouriteId) -> Result<(), RemoteError>;
}
