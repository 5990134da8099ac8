//! Project directory: the known projects and the current selection.

use prd_types::project::{Project, ProjectId};

#[derive(Debug, Default)]
pub struct ProjectDirectory {
    projects: Vec<Project>,
    current: Option<ProjectId>,
}

impl ProjectDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list(&self) -> &[Project] {
        &self.projects
    }

    pub fn get(&self, id: &ProjectId) -> Option<&Project> {
        self.projects.iter().find(|p| &p.id == id)
    }

    pub fn active(&self) -> Option<&ProjectId> {
        self.current.as_ref()
    }

    pub fn active_project(&self) -> Option<&Project> {
        self.current.as_ref().and_then(|id| self.get(id))
    }

    /// Replace the whole list. A selection that no longer exists is cleared.
    pub fn replace_all(&mut self, projects: Vec<Project>) {
        self.projects = projects;
        if let Some(current) = &self.current {
            if self.get(current).is_none() {
                self.current = None;
            }
        }
    }

    /// Add a new project at the front and make it current.
    pub fn insert(&mut self, project: Project) {
        self.projects.retain(|p| p.id != project.id);
        self.current = Some(project.id.clone());
        self.projects.insert(0, project);
    }

    /// Replace a project in place, or add it at the front if unknown.
    pub fn upsert(&mut self, project: Project) {
        match self.projects.iter_mut().find(|p| p.id == project.id) {
            Some(slot) => *slot = project,
            None => self.projects.insert(0, project),
        }
    }

    /// Remove a project; clears the selection if it was current.
    pub fn remove(&mut self, id: &ProjectId) -> bool {
        let before = self.projects.len();
        self.projects.retain(|p| &p.id != id);
        if self.current.as_ref() == Some(id) {
            self.current = None;
        }
        self.projects.len() != before
    }

    /// Select a known project. Unknown ids are rejected.
    pub fn select(&mut self, id: &ProjectId) -> bool {
        if self.get(id).is_some() {
            self.current = Some(id.clone());
            true
        } else {
            false
        }
    }

    pub fn clear_selection(&mut self) {
        self.current = None;
    }
}
