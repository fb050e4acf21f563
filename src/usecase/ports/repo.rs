use std::collections::BTreeMap;

use thiserror::Error;

use crate::domain::entities::customer::Customer;
use crate::domain::entities::project::{Project, ProjectStatus};
use crate::domain::entities::query::{PageQuery, PageResult};
use crate::domain::entities::team_member::TeamMember;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepoError {
    #[error("{0}")]
    Message(String),
}

impl From<anyhow::Error> for RepoError {
    fn from(err: anyhow::Error) -> Self {
        RepoError::Message(format!("{err:#}"))
    }
}

pub trait DirectoryRepository {
    fn init(&self) -> Result<(), RepoError>;

    fn list_customers(&self) -> Result<Vec<Customer>, RepoError>;
    fn list_team_members(&self) -> Result<Vec<TeamMember>, RepoError>;
    fn query_projects(&self, query: &PageQuery) -> Result<PageResult<Project>, RepoError>;
    fn project_status_counts(&self) -> Result<BTreeMap<ProjectStatus, i64>, RepoError>;

    fn insert_customers(&self, customers: &[Customer]) -> Result<usize, RepoError>;
    fn insert_projects(&self, projects: &[Project]) -> Result<usize, RepoError>;
    fn insert_team_members(&self, members: &[TeamMember]) -> Result<usize, RepoError>;
}
