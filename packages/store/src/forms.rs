//! Form state for the create and edit views.
//!
//! Forms turn their fields into insert payloads. A name that is empty after
//! trimming produces no payload, which is how views avoid issuing a create call
//! for blank input. The name itself is sent as typed.

use crate::models::{NewProject, NewWorkspace, Profile, SessionUser, Visibility};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct WorkspaceForm {
    pub name: String,
}

impl WorkspaceForm {
    pub fn submission(&self, owner: &SessionUser) -> Option<NewWorkspace> {
        if self.name.trim().is_empty() {
            return None;
        }
        Some(NewWorkspace {
            name: self.name.clone(),
            owner_id: owner.id.clone(),
        })
    }

    pub fn clear(&mut self) {
        self.name.clear();
    }
}

/// New-project fields. Visibility starts as, and resets to, private.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProjectForm {
    pub name: String,
    pub description: String,
    pub visibility: Visibility,
}

impl ProjectForm {
    pub fn submission(&self, workspace_id: &str, author: &SessionUser) -> Option<NewProject> {
        if self.name.trim().is_empty() {
            return None;
        }
        Some(NewProject {
            name: self.name.clone(),
            description: self.description.clone(),
            visibility: self.visibility,
            workspace_id: workspace_id.to_string(),
            author_id: author.id.clone(),
        })
    }

    pub fn reset(&mut self) {
        *self = ProjectForm::default();
    }
}

/// Editable columns of a [`Profile`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProfileField {
    Username,
    FullName,
    Website,
    AvatarUrl,
}

impl ProfileField {
    pub const ALL: [ProfileField; 4] = [
        ProfileField::Username,
        ProfileField::FullName,
        ProfileField::Website,
        ProfileField::AvatarUrl,
    ];

    /// Column name, also used as the input's `name` attribute.
    pub fn name(&self) -> &'static str {
        match self {
            ProfileField::Username => "username",
            ProfileField::FullName => "full_name",
            ProfileField::Website => "website",
            ProfileField::AvatarUrl => "avatar_url",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProfileField::Username => "Username",
            ProfileField::FullName => "Full Name",
            ProfileField::Website => "Website",
            ProfileField::AvatarUrl => "Avatar URL",
        }
    }
}

impl Profile {
    fn slot(&mut self, field: ProfileField) -> &mut Option<String> {
        match field {
            ProfileField::Username => &mut self.username,
            ProfileField::FullName => &mut self.full_name,
            ProfileField::Website => &mut self.website,
            ProfileField::AvatarUrl => &mut self.avatar_url,
        }
    }

    /// Current value of `field`; unset columns read as "".
    pub fn field(&self, field: ProfileField) -> &str {
        let value = match field {
            ProfileField::Username => &self.username,
            ProfileField::FullName => &self.full_name,
            ProfileField::Website => &self.website,
            ProfileField::AvatarUrl => &self.avatar_url,
        };
        value.as_deref().unwrap_or("")
    }

    pub fn set_field(&mut self, field: ProfileField, value: String) {
        *self.slot(field) = Some(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> SessionUser {
        SessionUser {
            id: "u1".to_string(),
            email: Some("ada@example.com".to_string()),
        }
    }

    #[test]
    fn test_blank_names_produce_no_payload() {
        for name in ["", "   ", "\t\n"] {
            let ws = WorkspaceForm {
                name: name.to_string(),
            };
            assert!(ws.submission(&user()).is_none());

            let project = ProjectForm {
                name: name.to_string(),
                ..ProjectForm::default()
            };
            assert!(project.submission("w1", &user()).is_none());
        }
    }

    #[test]
    fn test_name_is_sent_as_typed() {
        let form = WorkspaceForm {
            name: "  Team  ".to_string(),
        };
        assert_eq!(
            form.submission(&user()),
            Some(NewWorkspace {
                name: "  Team  ".to_string(),
                owner_id: "u1".to_string(),
            })
        );
    }

    #[test]
    fn test_project_payload_carries_parent_and_author() {
        let form = ProjectForm {
            name: "Roadmap".to_string(),
            description: "Q3".to_string(),
            visibility: Visibility::Workspace,
        };
        let new = form.submission("w9", &user()).unwrap();
        assert_eq!(new.workspace_id, "w9");
        assert_eq!(new.author_id, "u1");
        assert_eq!(new.visibility, Visibility::Workspace);
    }

    #[test]
    fn test_profile_fields() {
        let mut profile = Profile {
            id: "u1".to_string(),
            ..Profile::default()
        };
        assert_eq!(profile.field(ProfileField::Website), "");

        profile.set_field(ProfileField::AvatarUrl, "https://img/a.png".to_string());
        assert_eq!(profile.avatar_url.as_deref(), Some("https://img/a.png"));
        assert_eq!(ProfileField::AvatarUrl.name(), "avatar_url");
    }
}
