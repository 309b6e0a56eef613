//! # Store Messages
//!
//! The request enum sent from a [`StoreClient`](crate::StoreClient) to its
//! [`RecordStore`](crate::RecordStore). Every variant carries a oneshot sender for the reply.
//!
//! - **Create**: builds a record from [`Record::Draft`] under a fresh id.
//! - **Get**: reads one record by id.
//! - **List**: reads every record matching an optional [`Record::Filter`], in id order.
//! - **Update**: applies a [`Record::Patch`].
//! - **Delete**: removes a record.
//! - **Action**: runs a record-specific [`Record::Action`].

use crate::error::StoreError;
use crate::record::Record;
use tokio::sync::oneshot;

/// Reply channel used by every request.
pub type Response<T> = oneshot::Sender<Result<T, StoreError>>;

#[derive(Debug)]
pub enum StoreRequest<T: Record> {
    Create {
        draft: T::Draft,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
        filter: Option<T::Filter>,
        respond_to: Response<Vec<T>>,
    },
    Update {
        id: T::Id,
        patch: T::Patch,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::Outcome>,
    },
}
