use std::collections::BTreeMap;
use std::rc::Rc;

use crate::domain::entities::customer::Customer;
use crate::domain::entities::project::{Project, ProjectStatus};
use crate::domain::entities::query::{PageQuery, PageResult};
use crate::domain::entities::team_member::TeamMember;
use crate::usecase::ports::repo::{DirectoryRepository, RepoError};

#[derive(Clone)]
pub struct QueryService {
    repo: Rc<dyn DirectoryRepository>,
}

impl QueryService {
    pub fn new(repo: Rc<dyn DirectoryRepository>) -> Self {
        Self { repo }
    }

    pub fn customers(&self) -> Result<Vec<Customer>, RepoError> {
        self.repo.list_customers()
    }

    pub fn team_members(&self) -> Result<Vec<TeamMember>, RepoError> {
        self.repo.list_team_members()
    }

    pub fn projects_page(&self, query: &PageQuery) -> Result<PageResult<Project>, RepoError> {
        self.repo.query_projects(query)
    }

    pub fn project_status_counts(&self) -> Result<BTreeMap<ProjectStatus, i64>, RepoError> {
        self.repo.project_status_counts()
    }
}
