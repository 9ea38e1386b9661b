/*
 * Mentorship project
 *
 * Permission is hereby granted, free of charge, to any person obtaining
 * a copy of this software and associated documentation files (the “Software”),
 * to deal in the Software without restriction, including without limitation
 * the rights to use, copy, modify, merge, publish, distribute, sublicense,
 * and/or sell copies of the Software, and to permit persons to whom the
 * Software is furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included
 * in all copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED “AS IS”, WITHOUT WARRANTY OF ANY KIND, EXPRESS
 * OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
 * AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
 * FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER
 * DEALINGS IN THE SOFTWARE.
 */
use crate::data_model::mentor::{Mentor, NewMentor};
use crate::data_model::student::{NewStudent, Student};
use crate::error::{Entity, ServiceError, ServiceResult};
use crate::state::store::Store;
use log::{error, info};
use std::sync::Arc;

/// One step of a multi-document update. Mentor lists are only edited with
/// atomic push/pull so concurrent assignments to one mentor all land.
#[derive(Debug, Clone)]
enum Change {
    Push { mentor: String, student: String },
    Pull { mentor: String, student: String },
    SetStudent { new: Student, old: Student },
}

/// Keeps `Mentor.students` and `Student.mentor` pointing at each other.
#[derive(Clone)]
pub struct RelationshipService {
    store: Arc<dyn Store>,
}

impl RelationshipService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn Store> {
        &self.store
    }

    pub async fn create_mentor(&self, input: NewMentor) -> ServiceResult<Mentor> {
        let name = validate_name(&input.name)?;
        let mentor = self.store.insert_mentor(name).await?;
        info!("Added mentor {} with ID {}", mentor.name, mentor.id);
        Ok(mentor)
    }

    pub async fn create_student(&self, input: NewStudent) -> ServiceResult<Student> {
        let name = validate_name(&input.name)?;
        let student = self.store.insert_student(name).await?;
        info!("Added student {} with ID {}", student.name, student.id);
        Ok(student)
    }

    /// Puts the student under the mentor. The student's previous mentor, if
    /// any, keeps its entry, and repeating the call appends the id again.
    pub async fn assign_student(&self, mentor_id: &str, student_id: &str) -> ServiceResult<()> {
        let mentor = self.load_mentor(mentor_id, Entity::Mentor).await?;
        let student = self.load_student(student_id).await?;

        let mut updated = student.clone();
        updated.mentor = Some(mentor.id.clone());

        self.apply(vec![
            Change::Push {
                mentor: mentor.id,
                student: student.id.clone(),
            },
            Change::SetStudent {
                new: updated,
                old: student,
            },
        ])
        .await?;
        info!("Assigned student {} to mentor {}", student_id, mentor_id);
        Ok(())
    }

    /// Moves the student to `mentor_id`, removing it from its current mentor.
    /// A current mentor that no longer exists is skipped.
    pub async fn reassign_mentor(&self, student_id: &str, mentor_id: &str) -> ServiceResult<()> {
        let student = self.load_student(student_id).await?;
        let mentor = self.load_mentor(mentor_id, Entity::Mentor).await?;

        let mut steps = Vec::new();
        if let Some(prev) = &student.mentor {
            steps.push(Change::Pull {
                mentor: prev.clone(),
                student: student.id.clone(),
            });
        }

        let mut updated = student.clone();
        updated.mentor = Some(mentor.id.clone());
        steps.push(Change::SetStudent {
            new: updated,
            old: student.clone(),
        });
        steps.push(Change::Push {
            mentor: mentor.id,
            student: student.id,
        });

        self.apply(steps).await?;
        info!("Assigned mentor {} to student {}", mentor_id, student_id);
        Ok(())
    }

    pub async fn unassigned_students(&self) -> ServiceResult<Vec<Student>> {
        Ok(self.store.find_students(None).await?)
    }

    pub async fn mentor_students(&self, mentor_id: &str) -> ServiceResult<Vec<Student>> {
        let mentor = self.load_mentor(mentor_id, Entity::Mentor).await?;
        Ok(self.store.find_students(Some(&mentor.id)).await?)
    }

    pub async fn previous_mentor(&self, student_id: &str) -> ServiceResult<Mentor> {
        let student = self.load_student(student_id).await?;
        match student.mentor {
            Some(m) => self.load_mentor(&m, Entity::PreviousMentor).await,
            None => Err(ServiceError::NotFound(Entity::PreviousMentor)),
        }
    }

    async fn load_mentor(&self, id: &str, entity: Entity) -> ServiceResult<Mentor> {
        self.store
            .get_mentor(id)
            .await?
            .ok_or(ServiceError::NotFound(entity))
    }

    async fn load_student(&self, id: &str) -> ServiceResult<Student> {
        self.store
            .get_student(id)
            .await?
            .ok_or(ServiceError::NotFound(Entity::Student))
    }

    /// Runs one step and returns the step that undoes it, if any.
    async fn run(&self, step: &Change) -> ServiceResult<Option<Change>> {
        match step {
            Change::Push { mentor, student } => {
                if !self.store.push_student(mentor, student).await? {
                    return Err(ServiceError::NotFound(Entity::Mentor));
                }
                Ok(Some(Change::Pull {
                    mentor: mentor.clone(),
                    student: student.clone(),
                }))
            }
            Change::Pull { mentor, student } => {
                if self.store.pull_student(mentor, student).await? {
                    Ok(Some(Change::Push {
                        mentor: mentor.clone(),
                        student: student.clone(),
                    }))
                } else {
                    info!("Mentor {} is gone or did not list student {}", mentor, student);
                    Ok(None)
                }
            }
            Change::SetStudent { new, old } => {
                self.store.set_student(new).await?;
                Ok(Some(Change::SetStudent {
                    new: old.clone(),
                    old: new.clone(),
                }))
            }
        }
    }

    /// Runs `steps` in order. If one fails, the steps already done are
    /// undone in reverse.
    async fn apply(&self, steps: Vec<Change>) -> ServiceResult<()> {
        let mut undo = Vec::new();
        for (i, step) in steps.iter().enumerate() {
            match self.run(step).await {
                Ok(u) => undo.extend(u),
                Err(e) => {
                    error!("Step {} of {} failed: {}", i + 1, steps.len(), e);
                    self.rollback(undo).await;
                    return Err(e);
                }
            }
        }
        Ok(())
    }

    async fn rollback(&self, undo: Vec<Change>) {
        for step in undo.into_iter().rev() {
            if let Err(e) = self.run(&step).await {
                error!("Failed to roll back {:?}: {}", step, e);
            }
        }
    }
}

fn validate_name(name: &str) -> ServiceResult<&str> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ServiceError::InvalidInput("name must not be empty".to_string()));
    }
    Ok(name)
}
