//! Effects describing the provider's I/O.
//!
//! Each constructor only describes a backend or store call; nothing runs
//! until the provider executes the effect against its environment and
//! applies the outcome. Returning `BoxedEffect` keeps the signatures
//! uniform for the provider.

use super::credentials::{AuthToken, Credentials, LoginGrant, PasswordChange, VerifiedToken};
use super::error::AuthError;
use super::SessionEnv;
use crate::store::{StoreError, StoredCredentials};
use stillwater::effect::BoxedEffect;
use stillwater::prelude::*;

pub(crate) fn load_credentials<Env: SessionEnv>(
) -> BoxedEffect<Option<StoredCredentials>, StoreError, Env> {
    from_fn(|env: &Env| env.load()).boxed()
}

pub(crate) fn save_credentials<Env: SessionEnv>(
    record: StoredCredentials,
) -> BoxedEffect<(), StoreError, Env> {
    from_fn(move |env: &Env| env.save(&record)).boxed()
}

pub(crate) fn clear_credentials<Env: SessionEnv>() -> BoxedEffect<(), StoreError, Env> {
    from_fn(|env: &Env| env.clear()).boxed()
}

pub(crate) fn authenticate<Env: SessionEnv>(
    credentials: Credentials,
) -> BoxedEffect<LoginGrant, AuthError, Env> {
    from_fn(move |env: &Env| env.authenticate(&credentials)).boxed()
}

pub(crate) fn verify_token<Env: SessionEnv>(
    token: AuthToken,
) -> BoxedEffect<VerifiedToken, AuthError, Env> {
    from_fn(move |env: &Env| env.verify(&token)).boxed()
}

pub(crate) fn submit_password_change<Env: SessionEnv>(
    token: AuthToken,
    change: PasswordChange,
) -> BoxedEffect<(), AuthError, Env> {
    from_fn(move |env: &Env| env.change_password(&token, &change)).boxed()
}

pub(crate) fn revoke_token<Env: SessionEnv>(
    token: AuthToken,
) -> BoxedEffect<(), AuthError, Env> {
    from_fn(move |env: &Env| env.revoke(&token)).boxed()
}
