//! tests/payment_tests.rs
//! Pruebas de `PaymentService`.

#[cfg(test)]
mod tests {
    use actix_rt::test;
    use chrono::{Duration, Local, NaiveDate};

    use crate::error::AppError;
    use crate::models::page_model::PaginationQuery;
    use crate::models::payment_model::{ModifyPaymentRequest, PaymentFilter};
    use crate::tests::fixtures::{payment_request, setup};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    async fn create_payment_keeps_date_and_method() {
        let ctx = setup().await;
        let mut req = payment_request(1001, 2500.5);
        req.metodo_pago = " 03 ".to_string();

        let payment = ctx.services.payments.create_payment(req).await.unwrap();

        assert_eq!(payment.id_recibo, 1001);
        assert_eq!(payment.monto, 2500.5);
        assert_eq!(payment.metodo_pago, "03");
        assert_eq!(payment.fecha_pago, date(2024, 8, 15));
        assert_eq!(payment.descuento, 10);
    }

    #[test]
    async fn create_payment_rejects_bad_values() {
        let ctx = setup().await;
        let mut req = payment_request(0, -5.0);
        req.descuento = 120;
        req.metodo_pago = "07".to_string();
        req.recibo = "ftp://recibos/1.pdf".to_string();
        req.fecha_pago = Local::now().date_naive() + Duration::days(3);

        match ctx.services.payments.create_payment(req).await {
            Err(AppError::Validation(errors)) => {
                for field in [
                    "id_recibo",
                    "monto",
                    "descuento",
                    "metodo_pago",
                    "recibo",
                    "fecha_pago",
                ] {
                    assert!(errors.has_field(field), "falta error en {}", field);
                }
            }
            other => panic!("se esperaba error de validación, llegó {:?}", other),
        }
    }

    #[test]
    async fn create_payment_rejects_sub_cent_amounts() {
        let ctx = setup().await;
        let result = ctx
            .services
            .payments
            .create_payment(payment_request(7, 10.005))
            .await;

        assert!(matches!(result, Err(AppError::Validation(e)) if e.has_field("monto")));
    }

    #[test]
    async fn modify_payment_revalidates_merged_row() {
        let ctx = setup().await;
        let payments = &ctx.services.payments;
        let created = payments
            .create_payment(payment_request(10, 1500.0))
            .await
            .unwrap();

        let modified = payments
            .modify_payment(
                created.id,
                ModifyPaymentRequest {
                    monto: Some(1750.25),
                    metodo_pago: Some("28".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(modified.monto, 1750.25);
        assert_eq!(modified.metodo_pago, "28");
        assert_eq!(modified.id_recibo, 10);

        let result = payments
            .modify_payment(
                created.id,
                ModifyPaymentRequest {
                    fecha_pago: Some(date(1999, 12, 31)),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    async fn list_payments_filters_by_date_range_and_method() {
        let ctx = setup().await;
        let payments = &ctx.services.payments;

        let mut january = payment_request(1, 100.0);
        january.fecha_pago = date(2024, 1, 10);
        let mut march = payment_request(2, 200.0);
        march.fecha_pago = date(2024, 3, 5);
        march.metodo_pago = "04".to_string();
        let mut june = payment_request(3, 300.0);
        june.fecha_pago = date(2024, 6, 20);

        for req in [january, march, june] {
            payments.create_payment(req).await.unwrap();
        }

        let all = payments
            .list_payments(&PaymentFilter::default(), &PaginationQuery::default())
            .await
            .unwrap();
        assert_eq!(all.total, 3);
        // Más recientes primero
        assert_eq!(all.items[0].id_recibo, 3);

        let range = PaymentFilter {
            fecha_desde: Some(date(2024, 2, 1)),
            fecha_hasta: Some(date(2024, 6, 30)),
            ..Default::default()
        };
        let page = payments
            .list_payments(&range, &PaginationQuery::default())
            .await
            .unwrap();
        assert_eq!(page.total, 2);

        let by_method = PaymentFilter {
            metodo_pago: Some("04".to_string()),
            ..Default::default()
        };
        let page = payments
            .list_payments(&by_method, &PaginationQuery::default())
            .await
            .unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].id_recibo, 2);
    }

    #[test]
    async fn delete_payment_twice_is_not_found() {
        let ctx = setup().await;
        let payments = &ctx.services.payments;
        let created = payments
            .create_payment(payment_request(5, 50.0))
            .await
            .unwrap();

        payments.delete_payment(created.id).await.unwrap();
        assert!(matches!(
            payments.delete_payment(created.id).await,
            Err(AppError::NotFound { .. })
        ));
    }
}
