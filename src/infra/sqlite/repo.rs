use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::domain::entities::customer::Customer;
use crate::domain::entities::project::{Project, ProjectStatus};
use crate::domain::entities::query::{PageQuery, PageResult};
use crate::domain::entities::team_member::TeamMember;
use crate::infra::sqlite::queries::{
    insert_customers, insert_projects, insert_team_members, list_customers, list_team_members,
    project_status_counts, query_projects,
};
use crate::infra::sqlite::schema::init_db;
use crate::usecase::ports::repo::{DirectoryRepository, RepoError};

pub struct SqliteRepo {
    pub db_path: PathBuf,
}

impl SqliteRepo {
    pub fn new(db_path: PathBuf) -> Self {
        Self { db_path }
    }
}

impl DirectoryRepository for SqliteRepo {
    fn init(&self) -> Result<(), RepoError> {
        Ok(init_db(&self.db_path)?)
    }

    fn list_customers(&self) -> Result<Vec<Customer>, RepoError> {
        Ok(list_customers(&self.db_path)?)
    }

    fn list_team_members(&self) -> Result<Vec<TeamMember>, RepoError> {
        Ok(list_team_members(&self.db_path)?)
    }

    fn query_projects(&self, query: &PageQuery) -> Result<PageResult<Project>, RepoError> {
        Ok(query_projects(&self.db_path, query)?)
    }

    fn project_status_counts(&self) -> Result<BTreeMap<ProjectStatus, i64>, RepoError> {
        Ok(project_status_counts(&self.db_path)?)
    }

    fn insert_customers(&self, customers: &[Customer]) -> Result<usize, RepoError> {
        Ok(insert_customers(&self.db_path, customers)?)
    }

    fn insert_projects(&self, projects: &[Project]) -> Result<usize, RepoError> {
        Ok(insert_projects(&self.db_path, projects)?)
    }

    fn insert_team_members(&self, members: &[TeamMember]) -> Result<usize, RepoError> {
        Ok(insert_team_members(&self.db_path, members)?)
    }
}
