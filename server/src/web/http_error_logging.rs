use crate::web::api::APIError;
use log::{error, info, warn};

pub async fn error_logging_middleware<B: actix_web::body::MessageBody>(
    req: actix_web::dev::ServiceRequest,
    next: actix_web::middleware::Next<B>,
) -> Result<actix_web::dev::ServiceResponse<B>, actix_web::Error> {
    let response = next.call(req).await?;

    if let Some(error) = response.response().error() {
        if let Some(api_error) = error.as_error::<APIError>() {
            match api_error {
                APIError::BookingConflict(conflict) => {
                    info!(
                        "HTTP {} booking refused at <{}>: {}",
                        response.response().status(),
                        response.request().uri(),
                        conflict
                    );
                }
                APIError::InvalidData(e) => {
                    warn!(
                        "HTTP {} invalid data at <{}>: {}",
                        response.response().status(),
                        response.request().uri(),
                        e
                    );
                }
                APIError::InvalidJson(e) => {
                    warn!(
                        "HTTP {} invalid JSON at <{}>. Client: <{}> Cause: {}",
                        response.response().status(),
                        response.request().uri(),
                        response
                            .request()
                            .connection_info()
                            .realip_remote_addr()
                            .unwrap_or("unknown"),
                        e
                    );
                }
                APIError::NotExisting
                | APIError::ArtistNotFound
                | APIError::VenueNotFound
                | APIError::InvalidDate(_) => {}
                APIError::TransactionConflict => {
                    warn!(
                        "HTTP {} database transaction conflict at <{}>",
                        response.response().status(),
                        response.request().uri(),
                    );
                }
                APIError::InternalError(e) => {
                    error!(
                        "HTTP {} internal server error at <{}>: {}",
                        response.response().status(),
                        response.request().uri(),
                        e
                    );
                }
            }
        } else {
            error!(
                "HTTP {} unexpected error at <{}>: {:?}",
                response.response().status(),
                response.request().uri(),
                error
            );
        }
    }
    Ok(response)
}
