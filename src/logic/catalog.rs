//! Cluster Catalog
//!
//! Display name and description per cluster index.

use serde::Serialize;

use super::error::{ClusterError, ClusterResult};
use super::types::Cluster;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterDescriptor {
    pub index: usize,
    pub name: &'static str,
    pub description: &'static str,
}

pub static CLUSTER_CATALOG: [ClusterDescriptor; Cluster::COUNT] = [
    ClusterDescriptor {
        index: 0,
        name: "Elderly High Risk",
        description: "Older adults carrying one or more major risk markers: hypertension, \
                      heart disease, elevated BMI, HbA1c or blood glucose. Regular screening \
                      and medical follow-up are recommended.",
    },
    ClusterDescriptor {
        index: 1,
        name: "Healthy Low-Risk Adult",
        description: "Adults with BMI, HbA1c and blood glucose in the normal range and no \
                      hypertension or heart disease. Maintaining current habits and periodic \
                      check-ups is usually sufficient.",
    },
    ClusterDescriptor {
        index: 2,
        name: "Healthy Child/Adolescent",
        description: "Children, adolescents and young people with a healthy weight profile \
                      and no chronic conditions. Focus on balanced nutrition and physical \
                      activity.",
    },
    ClusterDescriptor {
        index: 3,
        name: "Young Adult High Glucose Risk",
        description: "Young and middle-aged adults showing early glycemic warning signs \
                      (pre-diabetic HbA1c or elevated glucose) or a smoking history. \
                      Lifestyle changes and glucose monitoring are advised.",
    },
];

/// Descriptor for a cluster index
pub fn descriptor(index: usize) -> ClusterResult<&'static ClusterDescriptor> {
    CLUSTER_CATALOG
        .get(index)
        .ok_or(ClusterError::NotFound { cluster: index })
}

/// All descriptors in index order
pub fn all() -> &'static [ClusterDescriptor] {
    &CLUSTER_CATALOG
}

impl Cluster {
    pub fn descriptor(&self) -> &'static ClusterDescriptor {
        &CLUSTER_CATALOG[self.index()]
    }

    pub fn name(&self) -> &'static str {
        self.descriptor().name
    }
}
