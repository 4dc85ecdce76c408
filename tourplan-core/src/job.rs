//! Job locations addressed by their row in the distance matrix.

/// Index of a node in the [`DistanceMatrix`](crate::DistanceMatrix).
pub type NodeIndex = usize;

/// A job location that a worker may be sent to.
///
/// `index` is the node's row and column in the distance matrix; `job_id` is
/// the identifier the job carried in its source dataset.
///
/// # Examples
/// ```
/// use tourplan_core::JobNode;
///
/// let job = JobNode::new(2, 1042, "10 Downing Street");
/// assert_eq!(job.index, 2);
/// assert_eq!(job.address, "10 Downing Street");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JobNode {
    /// Position of the job in the distance matrix.
    pub index: NodeIndex,
    /// External job identifier.
    pub job_id: u64,
    /// Human-readable address label.
    pub address: String,
}

impl JobNode {
    /// Construct a job node.
    #[must_use]
    pub fn new(index: NodeIndex, job_id: u64, address: impl Into<String>) -> Self {
        Self {
            index,
            job_id,
            address: address.into(),
        }
    }
}
