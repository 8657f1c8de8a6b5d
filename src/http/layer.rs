//! Tower middleware wiring the interceptor into a client stack.

use std::task::{Context, Poll};

use axum::http::Request;
use tower::{Layer, Service};

use crate::http::interceptor::BaseUrlsInterceptor;
use crate::routing::RoutingConfig;

/// Layer that rebases outgoing requests according to a [`RoutingConfig`].
#[derive(Debug, Clone)]
pub struct BaseUrlsLayer {
    interceptor: BaseUrlsInterceptor,
}

impl BaseUrlsLayer {
    pub fn new(config: RoutingConfig) -> Self {
        Self::from_interceptor(BaseUrlsInterceptor::new(config))
    }

    pub fn from_interceptor(interceptor: BaseUrlsInterceptor) -> Self {
        Self { interceptor }
    }

    pub fn interceptor(&self) -> &BaseUrlsInterceptor {
        &self.interceptor
    }
}

impl<S> Layer<S> for BaseUrlsLayer {
    type Service = BaseUrlsService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        BaseUrlsService {
            inner,
            interceptor: self.interceptor.clone(),
        }
    }
}

/// Service produced by [`BaseUrlsLayer`].
#[derive(Debug, Clone)]
pub struct BaseUrlsService<S> {
    inner: S,
    interceptor: BaseUrlsInterceptor,
}

impl<S, B> Service<Request<B>> for BaseUrlsService<S>
where
    S: Service<Request<B>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<B>) -> Self::Future {
        self.interceptor.intercept(&mut req);
        self.inner.call(req)
    }
}
