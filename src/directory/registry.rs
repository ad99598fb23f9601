// Activity registry: lookups and participant list mutations.

use parking_lot::RwLock;
use tracing::{debug, info};

use super::DirectoryError;
use crate::model::{Activities, Activity, ActivityName, Email};

/// Trait for activity directory backends.
pub trait Registry: Send + Sync {
    /// Returns a snapshot of every activity in seed order.
    fn list(&self) -> Activities;

    /// Returns a snapshot of one activity.
    fn get(&self, name: &ActivityName) -> Option<Activity>;

    /// Appends the email to the activity's participants.
    fn sign_up(&self, name: &ActivityName, email: &Email) -> Result<(), DirectoryError>;

    /// Removes the email from the activity's participants.
    fn unregister(&self, name: &ActivityName, email: &Email) -> Result<(), DirectoryError>;

    /// Replaces the whole directory with the given activities.
    fn reset(&self, activities: Activities);

    /// Returns (activity count, total participant count).
    fn stat(&self) -> (usize, usize);
}

/// Directory held in process memory behind a single lock.
///
/// Sign-up and unregister hold the write lock across the membership check
/// and the mutation.
pub struct InMemoryDirectory {
    activities: RwLock<Activities>,
}

impl InMemoryDirectory {
    pub fn new(activities: Activities) -> Self {
        Self {
            activities: RwLock::new(activities),
        }
    }
}

impl Registry for InMemoryDirectory {
    fn list(&self) -> Activities {
        self.activities.read().clone()
    }

    fn get(&self, name: &ActivityName) -> Option<Activity> {
        self.activities.read().get(name.as_str()).cloned()
    }

    fn sign_up(&self, name: &ActivityName, email: &Email) -> Result<(), DirectoryError> {
        let mut activities = self.activities.write();
        let activity = activities
            .get_mut(name.as_str())
            .ok_or_else(|| DirectoryError::NotFound {
                activity: name.to_string(),
            })?;

        if activity.has_participant(email.as_str()) {
            return Err(DirectoryError::AlreadySignedUp {
                activity: name.to_string(),
                email: email.to_string(),
            });
        }

        activity.participants.push(email.to_string());
        debug!(
            component = "directory",
            event = "signed_up",
            activity = %name,
            email = %email,
            participants = activity.participants.len(),
            "participant added"
        );
        Ok(())
    }

    fn unregister(&self, name: &ActivityName, email: &Email) -> Result<(), DirectoryError> {
        let mut activities = self.activities.write();
        let activity = activities
            .get_mut(name.as_str())
            .ok_or_else(|| DirectoryError::NotFound {
                activity: name.to_string(),
            })?;

        let Some(pos) = activity.participants.iter().position(|p| p == email.as_str()) else {
            return Err(DirectoryError::NotRegistered {
                activity: name.to_string(),
                email: email.to_string(),
            });
        };

        activity.participants.remove(pos);
        debug!(
            component = "directory",
            event = "unregistered",
            activity = %name,
            email = %email,
            participants = activity.participants.len(),
            "participant removed"
        );
        Ok(())
    }

    fn reset(&self, activities: Activities) {
        let count = activities.len();
        *self.activities.write() = activities;
        info!(
            component = "directory",
            event = "reset",
            activities = count,
            "directory reset"
        );
    }

    fn stat(&self) -> (usize, usize) {
        let activities = self.activities.read();
        let participants = activities.values().map(|a| a.participants.len()).sum();
        (activities.len(), participants)
    }
}
