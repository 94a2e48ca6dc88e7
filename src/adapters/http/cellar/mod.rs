//! HTTP adapter for the cellar.
//!
//! - `GET /` - Cellar list for signed-in users, landing page otherwise
//! - `GET|POST /add` - Add a wine (multipart, optional label photo)
//! - `GET /details/{id}` - Wine with its reviews and tasting notes
//! - `GET|POST /edit/{id}` - Edit a wine (multipart)
//! - `POST /update-quantity` - One bottle more or less
//! - `POST /delete` - Delete a wine
//! - `POST /add-review`, `/edit-review`, `/delete-review` - Pro reviews
//! - `POST /add-tasting-note`, `/delete-tasting-note` - Pro tasting notes

pub mod dto;
pub mod handlers;
pub mod multipart;
pub mod routes;

pub use routes::{cellar_protected_routes, cellar_public_routes};
