//! Servicio de carros
//!
//! Coordina la validación y los dos stores (engines y cars) para que un
//! carro y su motor se creen, actualicen y eliminen como una sola operación
//! lógica. Las escrituras son independientes: no hay transacción que abarque
//! ambas tablas, y las ventanas de inconsistencia se registran con `warn!`.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::config::CarRules;
use crate::models::{Car, CarFilter};
use crate::repositories::{CarRepository, CarStore, EngineRepository, EngineStore};
use crate::utils::errors::AppResult;
use crate::utils::validation::{check_brand, check_car, check_engine};

/// Operaciones de carros expuestas a las rutas HTTP
#[async_trait]
pub trait CarOperations: Send + Sync {
    async fn create(&self, car: Car) -> AppResult<Car>;
    async fn get_all(&self, filter: CarFilter) -> AppResult<Vec<Car>>;
    async fn get_by_id(&self, id: Uuid) -> AppResult<Car>;
    async fn update(&self, car: Car) -> AppResult<Car>;
    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

pub struct CarService {
    engines: Arc<dyn EngineStore>,
    cars: Arc<dyn CarStore>,
    rules: CarRules,
}

impl CarService {
    pub fn new(engines: Arc<dyn EngineStore>, cars: Arc<dyn CarStore>, rules: CarRules) -> Self {
        Self { engines, cars, rules }
    }

    /// Servicio respaldado por los repositorios PostgreSQL
    pub fn with_pool(pool: PgPool, rules: CarRules) -> Self {
        Self::new(
            Arc::new(EngineRepository::new(pool.clone())),
            Arc::new(CarRepository::new(pool)),
            rules,
        )
    }

    fn validate(&self, car: &Car) -> AppResult<()> {
        check_car(car, &self.rules)?;
        check_engine(&car.engine)
    }
}

#[async_trait]
impl CarOperations for CarService {
    #[instrument(skip(self, car), fields(brand = %car.brand, model = %car.model))]
    async fn create(&self, mut car: Car) -> AppResult<Car> {
        self.validate(&car)?;

        let id = Uuid::new_v4();
        car.assign_id(id);

        self.engines.create(&car.engine).await?;

        // Releer el motor por si el store aplicó valores por defecto
        car.engine = self.engines.get_by_id(id).await?;

        if let Err(e) = self.cars.create(&car).await {
            warn!("⚠️ Motor {} quedó sin carro: {}", id, e);
            return Err(e);
        }

        info!("✅ Carro creado: {}", id);
        self.get_by_id(id).await
    }

    #[instrument(skip(self))]
    async fn get_all(&self, filter: CarFilter) -> AppResult<Vec<Car>> {
        if let Some(brand) = filter.brand() {
            check_brand(brand, &self.rules)?;
        }

        let mut cars = self.cars.get_all(&filter).await?;

        if filter.include_engine {
            for car in cars.iter_mut() {
                car.engine = self.engines.get_by_id(car.id).await?;
            }
        }

        info!("📋 {} carros encontrados", cars.len());
        Ok(cars)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> AppResult<Car> {
        let mut car = self.cars.get_by_id(id).await?;
        car.engine = self.engines.get_by_id(id).await?;

        Ok(car)
    }

    #[instrument(skip(self, car), fields(id = %car.id))]
    async fn update(&self, car: Car) -> AppResult<Car> {
        self.engines.update(&car.engine).await?;

        // El motor ya cambió: un carro inválido deja la actualización a medias
        if let Err(e) = self.validate(&car) {
            warn!("⚠️ Motor {} actualizado pero el carro es inválido: {}", car.engine.id, e);
            return Err(e);
        }

        if let Err(e) = self.cars.update(&car).await {
            warn!("⚠️ Motor {} actualizado pero el carro no: {}", car.engine.id, e);
            return Err(e);
        }

        info!("✅ Carro actualizado: {}", car.id);
        Ok(car)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.cars.delete(id).await?;

        if let Err(e) = self.engines.delete(id).await {
            warn!("⚠️ Carro {} eliminado pero su motor no: {}", id, e);
            return Err(e);
        }

        info!("🗑️ Carro eliminado: {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Engine, FuelType};
    use crate::utils::errors::{not_found_error, AppError};
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Fallo inyectado en una operación del store
    #[derive(Clone, Copy)]
    enum Failure {
        NotFound,
        Storage,
    }

    /// Base de datos en memoria que implementa ambos stores y registra las llamadas
    #[derive(Default)]
    struct InMemoryDb {
        cars: Mutex<HashMap<Uuid, Car>>,
        engines: Mutex<HashMap<Uuid, Engine>>,
        calls: Mutex<Vec<String>>,
        failures: Mutex<Vec<(&'static str, Option<Uuid>, Failure)>>,
    }

    impl InMemoryDb {
        fn fail(&self, operation: &'static str, id: Option<Uuid>, failure: Failure) {
            self.failures.lock().unwrap().push((operation, id, failure));
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn seed(&self, car: &Car) {
            let mut row = car.clone();
            row.engine = Engine::with_id(car.id);
            self.cars.lock().unwrap().insert(car.id, row);
            self.engines.lock().unwrap().insert(car.id, car.engine);
        }

        // Registra la llamada y devuelve el fallo configurado, si lo hay
        fn record(&self, operation: &'static str, entity: &str, id: Uuid) -> AppResult<()> {
            self.calls.lock().unwrap().push(operation.to_string());

            let failures = self.failures.lock().unwrap();
            let failure = failures
                .iter()
                .find(|(op, target, _)| *op == operation && target.map_or(true, |t| t == id))
                .map(|(_, _, failure)| *failure);

            match failure {
                Some(Failure::NotFound) => Err(not_found_error(entity, id)),
                Some(Failure::Storage) => Err(AppError::Database(sqlx::Error::PoolTimedOut)),
                None => Ok(()),
            }
        }
    }

    #[async_trait]
    impl EngineStore for InMemoryDb {
        async fn create(&self, engine: &Engine) -> AppResult<()> {
            self.record("engine.create", "engine", engine.id)?;
            let mut engines = self.engines.lock().unwrap();
            if engines.contains_key(&engine.id) {
                return Err(AppError::EntityAlreadyExists("engine".to_string()));
            }
            engines.insert(engine.id, *engine);
            Ok(())
        }

        async fn get_by_id(&self, id: Uuid) -> AppResult<Engine> {
            self.record("engine.get_by_id", "engine", id)?;
            self.engines
                .lock()
                .unwrap()
                .get(&id)
                .copied()
                .ok_or_else(|| not_found_error("engine", id))
        }

        async fn update(&self, engine: &Engine) -> AppResult<()> {
            self.record("engine.update", "engine", engine.id)?;
            match self.engines.lock().unwrap().get_mut(&engine.id) {
                Some(stored) => {
                    *stored = *engine;
                    Ok(())
                }
                None => Err(not_found_error("engine", engine.id)),
            }
        }

        async fn delete(&self, id: Uuid) -> AppResult<()> {
            self.record("engine.delete", "engine", id)?;
            self.engines
                .lock()
                .unwrap()
                .remove(&id)
                .map(|_| ())
                .ok_or_else(|| not_found_error("engine", id))
        }
    }

    #[async_trait]
    impl CarStore for InMemoryDb {
        async fn create(&self, car: &Car) -> AppResult<()> {
            self.record("car.create", "car", car.id)?;
            let mut row = car.clone();
            row.engine = Engine::with_id(car.engine.id);
            self.cars.lock().unwrap().insert(car.id, row);
            Ok(())
        }

        async fn get_all(&self, filter: &CarFilter) -> AppResult<Vec<Car>> {
            self.record("car.get_all", "car", Uuid::nil())?;
            let mut cars: Vec<Car> = self
                .cars
                .lock()
                .unwrap()
                .values()
                .filter(|car| filter.brand().map_or(true, |b| car.brand.eq_ignore_ascii_case(b)))
                .cloned()
                .collect();
            cars.sort_by(|a, b| a.model.cmp(&b.model));
            Ok(cars)
        }

        async fn get_by_id(&self, id: Uuid) -> AppResult<Car> {
            self.record("car.get_by_id", "car", id)?;
            self.cars
                .lock()
                .unwrap()
                .get(&id)
                .cloned()
                .ok_or_else(|| not_found_error("car", id))
        }

        async fn update(&self, car: &Car) -> AppResult<()> {
            self.record("car.update", "car", car.id)?;
            let mut cars = self.cars.lock().unwrap();
            match cars.get_mut(&car.id) {
                Some(stored) => {
                    *stored = car.clone();
                    stored.engine = Engine::with_id(car.engine.id);
                    Ok(())
                }
                None => Err(not_found_error("car", car.id)),
            }
        }

        async fn delete(&self, id: Uuid) -> AppResult<()> {
            self.record("car.delete", "car", id)?;
            self.cars
                .lock()
                .unwrap()
                .remove(&id)
                .map(|_| ())
                .ok_or_else(|| not_found_error("car", id))
        }
    }

    fn service() -> (Arc<InMemoryDb>, CarService) {
        let db = Arc::new(InMemoryDb::default());
        let service = CarService::new(db.clone(), db.clone(), CarRules::default());
        (db, service)
    }

    fn bmw() -> Car {
        Car {
            id: Uuid::nil(),
            model: "X".to_string(),
            year_of_manufacture: 2020,
            brand: "BMW".to_string(),
            fuel_type: FuelType::Petrol,
            engine: Engine {
                id: Uuid::nil(),
                displacement: 100,
                n_cylinder: 2,
                range: 0,
            },
        }
    }

    fn stored(model: &str, brand: &str, fuel_type: FuelType, engine: (i32, i32, i32)) -> Car {
        let id = Uuid::new_v4();
        Car {
            id,
            model: model.to_string(),
            year_of_manufacture: 2021,
            brand: brand.to_string(),
            fuel_type,
            engine: Engine {
                id,
                displacement: engine.0,
                n_cylinder: engine.1,
                range: engine.2,
            },
        }
    }

    fn invalid_fields(err: AppError) -> Vec<String> {
        match err {
            AppError::InvalidParameter(fields) => fields,
            other => panic!("expected InvalidParameter, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_shared_id() {
        let (db, service) = service();

        let created = service.create(bmw()).await.unwrap();

        assert_ne!(created.id, Uuid::nil());
        assert_eq!(created.engine.id, created.id);
        assert_eq!(created.engine.displacement, 100);
        assert_eq!(created.engine.n_cylinder, 2);
        assert_eq!(created.brand, "BMW");
        assert_eq!(
            db.calls(),
            vec!["engine.create", "engine.get_by_id", "car.create", "car.get_by_id", "engine.get_by_id"]
        );
    }

    #[tokio::test]
    async fn test_create_then_get_by_id_round_trip() {
        let (_db, service) = service();
        let input = bmw();

        let created = service.create(input.clone()).await.unwrap();
        let fetched = service.get_by_id(created.id).await.unwrap();

        let mut expected = input;
        expected.assign_id(created.id);
        assert_eq!(fetched, expected);
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_car_without_store_calls() {
        let (db, service) = service();

        let mut car = bmw();
        car.model = String::new();
        assert_eq!(invalid_fields(service.create(car).await.unwrap_err()), vec!["model"]);

        let mut car = bmw();
        car.year_of_manufacture = 1865;
        assert_eq!(invalid_fields(service.create(car).await.unwrap_err()), vec!["yearOfManufacture"]);

        let mut car = bmw();
        car.brand = "Suzuki".to_string();
        assert_eq!(invalid_fields(service.create(car).await.unwrap_err()), vec!["brand"]);

        let mut car = bmw();
        car.engine.range = 10;
        car.engine.displacement = 10;
        car.engine.n_cylinder = 10;
        assert_eq!(
            invalid_fields(service.create(car).await.unwrap_err()),
            vec!["displacement", "noOfCylinder", "range"]
        );

        assert!(db.calls().is_empty());
    }

    #[tokio::test]
    async fn test_create_engine_failure_stops_before_car() {
        let (db, service) = service();
        db.fail("engine.create", None, Failure::Storage);

        let err = service.create(bmw()).await.unwrap_err();

        assert!(matches!(err, AppError::Database(_)));
        assert_eq!(db.calls(), vec!["engine.create"]);
        assert!(db.cars.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_car_failure_leaves_engine_row() {
        let (db, service) = service();
        db.fail("car.create", None, Failure::Storage);

        let err = service.create(bmw()).await.unwrap_err();

        assert!(matches!(err, AppError::Database(_)));
        assert!(db.cars.lock().unwrap().is_empty());
        assert_eq!(db.engines.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_get_all_with_engines() {
        let (db, service) = service();
        let tesla = stored("Model S", "Tesla", FuelType::Electric, (0, 0, 500));
        let porsche = stored("911", "porsche", FuelType::Petrol, (3000, 6, 0));
        db.seed(&tesla);
        db.seed(&porsche);

        let filter = CarFilter {
            brand: None,
            include_engine: true,
        };
        let cars = service.get_all(filter).await.unwrap();

        assert_eq!(cars, vec![porsche, tesla]);
    }

    #[tokio::test]
    async fn test_get_all_without_engines() {
        let (db, service) = service();
        let tesla = stored("Model S", "Tesla", FuelType::Electric, (0, 0, 500));
        db.seed(&tesla);

        let filter = CarFilter {
            brand: Some("TESLA".to_string()),
            include_engine: false,
        };
        let cars = service.get_all(filter).await.unwrap();

        assert_eq!(cars.len(), 1);
        assert_eq!(cars[0].engine, Engine::with_id(tesla.id));
        assert_eq!(db.calls(), vec!["car.get_all"]);
    }

    #[tokio::test]
    async fn test_get_all_empty_is_ok() {
        let (_db, service) = service();

        let filter = CarFilter {
            brand: Some("ferrari".to_string()),
            include_engine: true,
        };
        assert!(service.get_all(filter).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_all_rejects_unknown_brand() {
        let (db, service) = service();

        let filter = CarFilter {
            brand: Some("Suzuki".to_string()),
            include_engine: false,
        };
        let err = service.get_all(filter).await.unwrap_err();

        assert_eq!(invalid_fields(err), vec!["brand"]);
        assert!(db.calls().is_empty());
    }

    #[tokio::test]
    async fn test_get_all_engine_failure_aborts() {
        let (db, service) = service();
        let first = stored("A", "bmw", FuelType::Diesel, (2000, 4, 0));
        let second = stored("B", "bmw", FuelType::Diesel, (2500, 6, 0));
        db.seed(&first);
        db.seed(&second);
        db.fail("engine.get_by_id", Some(second.id), Failure::NotFound);

        let filter = CarFilter {
            brand: Some("bmw".to_string()),
            include_engine: true,
        };
        let err = service.get_all(filter).await.unwrap_err();

        assert!(matches!(err, AppError::EntityNotFound { ref entity, .. } if entity == "engine"));
    }

    #[tokio::test]
    async fn test_get_by_id_not_found() {
        let (db, service) = service();
        let id = Uuid::new_v4();

        let err = service.get_by_id(id).await.unwrap_err();

        assert!(matches!(err, AppError::EntityNotFound { ref entity, .. } if entity == "car"));
        assert_eq!(db.calls(), vec!["car.get_by_id"]);
    }

    #[tokio::test]
    async fn test_get_by_id_missing_engine() {
        let (db, service) = service();
        let car = stored("X", "bmw", FuelType::Petrol, (100, 2, 0));
        db.seed(&car);
        db.engines.lock().unwrap().clear();

        let err = service.get_by_id(car.id).await.unwrap_err();

        assert!(matches!(err, AppError::EntityNotFound { ref entity, .. } if entity == "engine"));
    }

    #[tokio::test]
    async fn test_update_returns_input() {
        let (db, service) = service();
        let car = stored("X", "bmw", FuelType::Petrol, (100, 2, 0));
        db.seed(&car);

        let mut changed = car.clone();
        changed.model = "X5".to_string();
        changed.engine.displacement = 300;

        let updated = service.update(changed.clone()).await.unwrap();

        assert_eq!(updated, changed);
        assert_eq!(db.calls(), vec!["engine.update", "car.update"]);
        assert_eq!(service.get_by_id(car.id).await.unwrap(), changed);
    }

    #[tokio::test]
    async fn test_update_engine_failure_skips_car() {
        let (db, service) = service();
        let car = stored("X", "bmw", FuelType::Petrol, (100, 2, 0));

        let err = service.update(car).await.unwrap_err();

        assert!(matches!(err, AppError::EntityNotFound { ref entity, .. } if entity == "engine"));
        assert_eq!(db.calls(), vec!["engine.update"]);
    }

    #[tokio::test]
    async fn test_update_invalid_car_after_engine_update() {
        let (db, service) = service();
        let car = stored("X", "bmw", FuelType::Petrol, (100, 2, 0));
        db.seed(&car);

        let mut changed = car.clone();
        changed.year_of_manufacture = 2030;
        changed.engine.displacement = 200;

        let err = service.update(changed).await.unwrap_err();

        assert_eq!(invalid_fields(err), vec!["yearOfManufacture"]);
        assert_eq!(db.calls(), vec!["engine.update"]);
        assert_eq!(db.engines.lock().unwrap()[&car.id].displacement, 200);
    }

    #[tokio::test]
    async fn test_update_unknown_brand_after_engine_update() {
        let (db, service) = service();
        let car = stored("X", "bmw", FuelType::Petrol, (100, 2, 0));
        db.seed(&car);

        let mut changed = car.clone();
        changed.brand = "Suzuki".to_string();
        changed.engine.displacement = 300;
        changed.engine.n_cylinder = 6;

        let err = service.update(changed).await.unwrap_err();

        assert_eq!(invalid_fields(err), vec!["brand"]);
        assert_eq!(db.calls(), vec!["engine.update"]);
        let engine = db.engines.lock().unwrap()[&car.id];
        assert_eq!((engine.displacement, engine.n_cylinder, engine.range), (300, 6, 0));
        assert_eq!(db.cars.lock().unwrap()[&car.id].brand, "bmw");
    }

    #[tokio::test]
    async fn test_update_engine_rule_after_engine_update() {
        let (db, service) = service();
        let car = stored("X", "bmw", FuelType::Petrol, (100, 2, 0));
        db.seed(&car);

        let mut changed = car.clone();
        changed.engine.displacement = 10;
        changed.engine.n_cylinder = 10;
        changed.engine.range = 10;

        let err = service.update(changed).await.unwrap_err();

        assert_eq!(invalid_fields(err), vec!["displacement", "noOfCylinder", "range"]);
        assert_eq!(db.calls(), vec!["engine.update"]);
        let engine = db.engines.lock().unwrap()[&car.id];
        assert_eq!((engine.displacement, engine.n_cylinder, engine.range), (10, 10, 10));
    }

    #[tokio::test]
    async fn test_delete_removes_both_rows() {
        let (db, service) = service();
        let car = stored("X", "bmw", FuelType::Petrol, (100, 2, 0));
        db.seed(&car);

        service.delete(car.id).await.unwrap();

        assert_eq!(db.calls(), vec!["car.delete", "engine.delete"]);
        assert!(db.cars.lock().unwrap().is_empty());
        assert!(db.engines.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_unknown_id_skips_engine() {
        let (db, service) = service();

        let err = service.delete(Uuid::new_v4()).await.unwrap_err();

        assert!(matches!(err, AppError::EntityNotFound { ref entity, .. } if entity == "car"));
        assert_eq!(db.calls(), vec!["car.delete"]);
    }

    #[tokio::test]
    async fn test_delete_engine_failure_after_car_removed() {
        let (db, service) = service();
        let car = stored("X", "bmw", FuelType::Petrol, (100, 2, 0));
        db.seed(&car);
        db.fail("engine.delete", Some(car.id), Failure::Storage);

        let err = service.delete(car.id).await.unwrap_err();

        assert!(matches!(err, AppError::Database(_)));
        assert!(db.cars.lock().unwrap().is_empty());
        assert_eq!(db.engines.lock().unwrap().len(), 1);
    }
}
