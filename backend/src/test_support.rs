//! Test utilities for the backend crate.
//!
//! Only compiled for tests. Provides capability-scoped file helpers and an
//! in-memory store implementing every driven port, so whole request flows can
//! run without PostgreSQL or a real images directory.

pub mod cap_fs {
    //! Capability-safe filesystem helpers for tests.

    use std::io;
    use std::path::Path;

    use cap_std::{ambient_authority, fs::Dir};

    fn parent_and_name(path: &Path) -> io::Result<(Dir, &Path)> {
        let parent = path
            .parent()
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "path has no parent"))?;
        let name = path
            .file_name()
            .map(Path::new)
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"))?;
        Ok((Dir::open_ambient_dir(parent, ambient_authority())?, name))
    }

    /// Read a file's bytes through `cap_std`.
    pub fn read_file(path: &Path) -> io::Result<Vec<u8>> {
        let (dir, name) = parent_and_name(path)?;
        dir.read(name)
    }

    /// Whether a file exists at `path`.
    pub fn file_exists(path: &Path) -> bool {
        parent_and_name(path).is_ok_and(|(dir, name)| dir.exists(name))
    }
}

pub mod memory {
    //! In-memory implementations of the driven ports.

    use std::collections::BTreeMap;
    use std::sync::{Mutex, MutexGuard, PoisonError};

    use async_trait::async_trait;

    use crate::domain::ports::{
        CustomerRepository, CustomerRepositoryError, PictureRepository, PictureRepositoryError,
        PictureStorage, PictureStorageError, UserPersistenceError, UserRepository,
    };
    use crate::domain::{
        CustomerChanges, CustomerId, CustomerView, NewCustomer, PLACEHOLDER_PICTURE_ID,
        PLACEHOLDER_PICTURE_PATH, PasswordHash, PictureId, PictureRecord, StoredCredentials,
        UserId, Username,
    };

    #[derive(Debug, Clone)]
    struct CustomerRow {
        name: String,
        surname: String,
        picture_id: PictureId,
        created_by: UserId,
        modified_by: UserId,
    }

    #[derive(Debug, Default)]
    struct State {
        users: BTreeMap<i32, (String, PasswordHash)>,
        pictures: BTreeMap<i32, String>,
        customers: BTreeMap<i32, CustomerRow>,
        files: BTreeMap<String, Vec<u8>>,
        next_user: i32,
        next_picture: i32,
        next_customer: i32,
    }

    impl State {
        fn username(&self, id: UserId) -> String {
            self.users
                .get(&id.get())
                .map(|(name, _)| name.clone())
                .unwrap_or_default()
        }

        fn view(&self, id: i32, row: &CustomerRow) -> Result<CustomerView, CustomerRepositoryError> {
            let picture_path = self
                .pictures
                .get(&row.picture_id.get())
                .cloned()
                .ok_or_else(|| CustomerRepositoryError::missing_picture(row.picture_id.get()))?;
            Ok(CustomerView {
                id: CustomerId::new(id).map_err(|err| CustomerRepositoryError::query(err.to_string()))?,
                name: row.name.clone(),
                surname: row.surname.clone(),
                picture_id: row.picture_id,
                picture_path,
                created_by_user: self.username(row.created_by),
                last_modified_by_user: self.username(row.modified_by),
            })
        }
    }

    /// Single store backing the user, customer, picture and file ports.
    #[derive(Debug)]
    pub struct InMemoryStore {
        state: Mutex<State>,
    }

    impl Default for InMemoryStore {
        fn default() -> Self {
            let mut pictures = BTreeMap::new();
            pictures.insert(PLACEHOLDER_PICTURE_ID.get(), PLACEHOLDER_PICTURE_PATH.to_owned());
            Self {
                state: Mutex::new(State {
                    pictures,
                    next_user: 1,
                    next_picture: PLACEHOLDER_PICTURE_ID.get() + 1,
                    next_customer: 1,
                    ..State::default()
                }),
            }
        }
    }

    impl InMemoryStore {
        fn state(&self) -> MutexGuard<'_, State> {
            self.state.lock().unwrap_or_else(PoisonError::into_inner)
        }

        /// Stored bytes for a file written through [`PictureStorage`].
        pub fn file(&self, name: &str) -> Option<Vec<u8>> {
            self.state().files.get(name).cloned()
        }
    }

    #[async_trait]
    impl UserRepository for InMemoryStore {
        async fn insert(
            &self,
            username: &Username,
            password_hash: &PasswordHash,
        ) -> Result<UserId, UserPersistenceError> {
            let mut state = self.state();
            if state.users.values().any(|(name, _)| name == username.as_str()) {
                return Err(UserPersistenceError::duplicate_username(username.as_str()));
            }
            let id = state.next_user;
            state.next_user += 1;
            state
                .users
                .insert(id, (username.as_str().to_owned(), password_hash.clone()));
            UserId::new(id).map_err(|err| UserPersistenceError::query(err.to_string()))
        }

        async fn find_credentials(
            &self,
            username: &str,
        ) -> Result<Option<StoredCredentials>, UserPersistenceError> {
            let state = self.state();
            state
                .users
                .iter()
                .find(|(_, (name, _))| name == username)
                .map(|(id, (_, hash))| {
                    Ok(StoredCredentials {
                        id: UserId::new(*id)
                            .map_err(|err| UserPersistenceError::query(err.to_string()))?,
                        password_hash: hash.clone(),
                    })
                })
                .transpose()
        }

        async fn find_id_by_username(
            &self,
            username: &str,
        ) -> Result<Option<UserId>, UserPersistenceError> {
            Ok(self
                .find_credentials(username)
                .await?
                .map(|credentials| credentials.id))
        }
    }

    #[async_trait]
    impl CustomerRepository for InMemoryStore {
        async fn list(&self) -> Result<Vec<CustomerView>, CustomerRepositoryError> {
            let state = self.state();
            state
                .customers
                .iter()
                .map(|(id, row)| state.view(*id, row))
                .collect()
        }

        async fn find(&self, id: CustomerId) -> Result<Option<CustomerView>, CustomerRepositoryError> {
            let state = self.state();
            state
                .customers
                .get(&id.get())
                .map(|row| state.view(id.get(), row))
                .transpose()
        }

        async fn insert(
            &self,
            customer: &NewCustomer,
            created_by: UserId,
        ) -> Result<CustomerView, CustomerRepositoryError> {
            let mut state = self.state();
            if !state.pictures.contains_key(&customer.picture_id.get()) {
                return Err(CustomerRepositoryError::missing_picture(customer.picture_id.get()));
            }
            let id = state.next_customer;
            state.next_customer += 1;
            let row = CustomerRow {
                name: customer.name.as_str().to_owned(),
                surname: customer.surname.as_str().to_owned(),
                picture_id: customer.picture_id,
                created_by,
                modified_by: created_by,
            };
            let view = state.view(id, &row)?;
            state.customers.insert(id, row);
            Ok(view)
        }

        async fn update(
            &self,
            id: CustomerId,
            changes: &CustomerChanges,
            modified_by: UserId,
        ) -> Result<Option<CustomerView>, CustomerRepositoryError> {
            let mut state = self.state();
            if let Some(picture) = changes.picture_id {
                if !state.pictures.contains_key(&picture.get()) {
                    return Err(CustomerRepositoryError::missing_picture(picture.get()));
                }
            }
            let Some(current) = state.customers.get(&id.get()).cloned() else {
                return Ok(None);
            };
            let row = CustomerRow {
                name: changes
                    .name
                    .as_ref()
                    .map_or(current.name, |name| name.as_str().to_owned()),
                surname: changes
                    .surname
                    .as_ref()
                    .map_or(current.surname, |surname| surname.as_str().to_owned()),
                picture_id: changes.picture_id.unwrap_or(current.picture_id),
                created_by: current.created_by,
                modified_by,
            };
            let view = state.view(id.get(), &row)?;
            state.customers.insert(id.get(), row);
            Ok(Some(view))
        }

        async fn delete(&self, id: CustomerId) -> Result<bool, CustomerRepositoryError> {
            Ok(self.state().customers.remove(&id.get()).is_some())
        }
    }

    #[async_trait]
    impl PictureRepository for InMemoryStore {
        async fn insert(&self, picture_path: &str) -> Result<PictureRecord, PictureRepositoryError> {
            let mut state = self.state();
            let id = state.next_picture;
            state.next_picture += 1;
            state.pictures.insert(id, picture_path.to_owned());
            Ok(PictureRecord {
                id: PictureId::new(id).map_err(|err| PictureRepositoryError::query(err.to_string()))?,
                picture_path: picture_path.to_owned(),
            })
        }

        async fn find(&self, id: PictureId) -> Result<Option<PictureRecord>, PictureRepositoryError> {
            Ok(self.state().pictures.get(&id.get()).map(|path| PictureRecord {
                id,
                picture_path: path.clone(),
            }))
        }
    }

    #[async_trait]
    impl PictureStorage for InMemoryStore {
        async fn store(
            &self,
            content: &[u8],
            extension: Option<String>,
        ) -> Result<String, PictureStorageError> {
            let mut state = self.state();
            let stem = state.files.len() + 1;
            let name = match extension {
                Some(ext) => format!("{stem}.{ext}"),
                None => stem.to_string(),
            };
            state.files.insert(name.clone(), content.to_vec());
            Ok(name)
        }

        async fn remove(&self, file_name: &str) -> Result<(), PictureStorageError> {
            self.state()
                .files
                .remove(file_name)
                .map(|_| ())
                .ok_or_else(|| PictureStorageError::io(format!("{file_name} not found")))
        }
    }
}
