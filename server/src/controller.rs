use std::future::IntoFuture;
use std::marker::PhantomData;

// Original: https://github.com/HalsekiRaika/architectured/blob/e5caa5c7ae801d1aaac6e275b3ea0ef26d6ff26b/server/src/controller.rs
/// Turns a decoded request into the input of a use case.
pub trait Intake<I>: 'static + Sync + Send {
    type To;
    fn emit(&self, input: I) -> Self::To;
}

/// Turns the output of a use case into a response.
pub trait Exhaust<O>: 'static + Sync + Send {
    type To;
    fn emit(&self, output: O) -> Self::To;
}

pub struct Controller<T, P, I, D, O> {
    transformer: T,
    presenter: P,
    _flow: PhantomData<fn(I) -> (D, O)>,
}

impl<T, P, I, D, O> Controller<T, P, I, D, O> {
    pub fn new(transformer: T, presenter: P) -> Self {
        Self {
            transformer,
            presenter,
            _flow: PhantomData,
        }
    }
}

impl<T, P, I, D, O> Controller<T, P, I, D, O>
where
    T: Intake<I, To = D>,
{
    pub fn intake(self, input: I) -> Transformed<P, D, O> {
        Transformed {
            transformed: self.transformer.emit(input),
            presenter: self.presenter,
            _output: PhantomData,
        }
    }
}

impl<P, O> Controller<(), P, (), (), O>
where
    P: Exhaust<O>,
{
    /// Runs a use case that takes no request input.
    pub async fn bypass<F, Fut, E>(self, f: F) -> Result<P::To, E>
    where
        F: FnOnce() -> Fut,
        Fut: IntoFuture<Output = Result<O, E>>,
    {
        Ok(self.presenter.emit(f().await?))
    }
}

pub struct Transformed<P, D, O> {
    transformed: D,
    presenter: P,
    _output: PhantomData<fn() -> O>,
}

impl<P, D, O> Transformed<P, D, O>
where
    P: Exhaust<O>,
{
    pub async fn handle<F, Fut, E>(self, f: F) -> Result<P::To, E>
    where
        F: FnOnce(D) -> Fut,
        Fut: IntoFuture<Output = Result<O, E>>,
    {
        Ok(self.presenter.emit(f(self.transformed).await?))
    }
}

#[cfg(test)]
mod test {
    use crate::controller::{Controller, Exhaust, Intake};

    struct Doubler;

    impl Intake<i64> for Doubler {
        type To = i64;
        fn emit(&self, input: i64) -> Self::To {
            input * 2
        }
    }

    struct Describer;

    impl Exhaust<i64> for Describer {
        type To = String;
        fn emit(&self, output: i64) -> Self::To {
            format!("got {output}")
        }
    }

    #[tokio::test]
    async fn runs_intake_use_case_and_presenter() {
        let result: Result<String, ()> = Controller::new(Doubler, Describer)
            .intake(21)
            .handle(|doubled| async move { Ok(doubled + 1) })
            .await;
        assert_eq!(result, Ok("got 43".to_string()));
    }

    #[tokio::test]
    async fn failure_skips_presenter() {
        let result: Result<String, &str> = Controller::new(Doubler, Describer)
            .intake(1)
            .handle(|_| async move { Err("store unavailable") })
            .await;
        assert_eq!(result, Err("store unavailable"));
    }

    #[tokio::test]
    async fn bypass_without_input() {
        let result: Result<String, ()> = Controller::new((), Describer)
            .bypass(|| async { Ok(7) })
            .await;
        assert_eq!(result, Ok("got 7".to_string()));
    }
}
