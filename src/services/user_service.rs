use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{NewUser, User},
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn create_user(state: &AppState, input: NewUser) -> AppResult<ApiResponse<User>> {
    let user = state.users.create(input).await?;
    Ok(ApiResponse::success("User created", user, Some(Meta::empty())))
}

pub async fn get_user(state: &AppState, id: Uuid) -> AppResult<ApiResponse<User>> {
    let user = state.users.get_by_id(id).await?;
    Ok(ApiResponse::success("User", user, None))
}
