use crate::api::employee;
use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig, api_prefix: &str) {
    cfg.service(
        web::scope(api_prefix)
            // /employee-form, kept outside /employee/{id} so every id stays routable
            .service(
                web::resource("/employee-form")
                    .route(web::get().to(employee::new_employee_form)),
            )
            .service(
                web::scope("/employee")
                    // /employee
                    .service(
                        web::resource("")
                            .route(web::get().to(employee::list_employees))
                            .route(web::post().to(employee::create_employee)),
                    )
                    // /employee/{id}/form
                    .service(
                        web::resource("/{id}/form")
                            .route(web::get().to(employee::get_employee_form)),
                    )
                    // /employee/{id}
                    .service(
                        web::resource("/{id}")
                            .route(web::put().to(employee::update_employee))
                            .route(web::delete().to(employee::delete_employee)),
                    ),
            ),
    );
}

// CREATE
//  ├─ GET  /employee-form       → blank fields
//  └─ POST /employee            → add employee + payslip → reload table
// EDIT
//  ├─ GET  /employee/{id}/form  → prefilled fields, id locked
//  └─ PUT  /employee/{id}       → update employee → reload table
// REMOVE
//  └─ DELETE /employee/{id}?confirm=true → delete → reload table
