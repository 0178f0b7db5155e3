//! Cluster catalog handlers

use axum::{extract::{rejection::PathRejection, Path}, Json};

use crate::{AppError, AppResult};
use crate::logic::{catalog, ClusterDescriptor, ClusterError};

/// List all clusters
pub async fn list() -> Json<&'static [ClusterDescriptor]> {
    Json(catalog::all())
}

/// Get one cluster by index
pub async fn get(
    index: Result<Path<usize>, PathRejection>,
) -> AppResult<Json<&'static ClusterDescriptor>> {
    let Path(index) = index?;

    catalog::descriptor(index)
        .map(Json)
        .map_err(|e| match e {
            ClusterError::NotFound { cluster } => {
                AppError::NotFound(format!("Cluster {} not found", cluster))
            }
            other => other.into(),
        })
}
